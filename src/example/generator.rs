use super::{decode::decode_example, explicit_example};
use crate::error::ExampleError;
use crate::extract::merge_all_of;
use crate::spec::{SchemaGraph, SchemaKind, SchemaNode, SchemaRef};
use serde_json::{Map, Value as JsonValue};

/// Default nesting budget for synthesized payloads
pub const DEFAULT_EXAMPLE_DEPTH: usize = 5;

/// Produces an example payload for a named schema
pub trait ExampleGenerator {
    /// # Errors
    ///
    /// Fails when `name` is not in the graph or no value fits in the generator's budget.
    fn generate(&self, graph: &SchemaGraph, name: &str) -> Result<JsonValue, ExampleError>;
}

/// Builds payloads from schema structure
///
/// Values are chosen per node in order: declared example, first of `examples`, `default`,
/// first enum literal, then a synthesized value (objects from their merged properties,
/// arrays with one item, unions from their first variant, scalars from [`dummy_value`]).
/// Properties nested deeper than `max_depth` are omitted, which bounds recursive schemas.
#[derive(Debug, Clone, Copy)]
pub struct SchemaExampleGenerator {
    pub max_depth: usize,
}

impl Default for SchemaExampleGenerator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_EXAMPLE_DEPTH,
        }
    }
}

impl SchemaExampleGenerator {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn value_for_ref(&self, graph: &SchemaGraph, schema: &SchemaRef, depth: usize) -> Option<JsonValue> {
        let node = match schema {
            SchemaRef::Named(name) => graph.get(name)?,
            SchemaRef::Inline(node) => node,
        };
        self.value_for_node(graph, node, depth)
    }

    fn value_for_node(&self, graph: &SchemaGraph, node: &SchemaNode, depth: usize) -> Option<JsonValue> {
        if let Some(value) = explicit_example(node) {
            return Some(value);
        }
        let declared = node
            .default
            .as_ref()
            .or_else(|| node.enum_values.first())
            .and_then(|raw| decode_example(raw).ok());
        if declared.is_some() {
            return declared;
        }
        if depth > self.max_depth {
            return None;
        }

        match node.kind() {
            SchemaKind::Union => node
                .one_of
                .iter()
                .find_map(|variant| self.value_for_ref(graph, variant, depth + 1)),
            SchemaKind::Object | SchemaKind::Composite => {
                let merged = merge_all_of(graph, node).ok()?;
                let mut object = Map::new();
                for property in merged.properties {
                    let Some(schema) = property.schema.as_ref() else {
                        continue;
                    };
                    if let Some(value) = self.value_for_ref(graph, schema, depth + 1) {
                        object.insert(property.name.clone(), value);
                    }
                }
                Some(JsonValue::Object(object))
            }
            SchemaKind::Array => Some(JsonValue::Array(
                node.items
                    .as_deref()
                    .and_then(|items| self.value_for_ref(graph, items, depth + 1))
                    .into_iter()
                    .collect(),
            )),
            SchemaKind::Scalar => Some(dummy_value(
                node.schema_type.as_deref(),
                node.format.as_deref(),
            )),
        }
    }
}

impl ExampleGenerator for SchemaExampleGenerator {
    fn generate(&self, graph: &SchemaGraph, name: &str) -> Result<JsonValue, ExampleError> {
        let node = graph
            .get(name)
            .ok_or_else(|| ExampleError::UnknownSchema(name.to_string()))?;
        self.value_for_node(graph, node, 0)
            .ok_or_else(|| ExampleError::DepthExceeded {
                name: name.to_string(),
                depth: self.max_depth,
            })
    }
}

/// Placeholder value for a scalar type and format
#[allow(clippy::approx_constant)]
pub fn dummy_value(ty: Option<&str>, format: Option<&str>) -> JsonValue {
    match ty {
        Some("string") => {
            let text = match format {
                Some("date-time") => "2024-01-01T00:00:00Z",
                Some("date") => "2024-01-01",
                Some("email") => "user@example.com",
                Some("uuid") => "00000000-0000-0000-0000-000000000000",
                Some("uri") | Some("url") => "https://example.com",
                _ => "example",
            };
            JsonValue::String(text.to_string())
        }
        Some("integer") => JsonValue::from(42),
        Some("number") => JsonValue::from(3.14),
        Some("boolean") => JsonValue::Bool(true),
        _ => JsonValue::Null,
    }
}
