//! Example payload resolution
//!
//! A body example comes from the first tier that yields one:
//!
//! 1. the media type's `example`
//! 2. the first entry of its `examples`
//! 3. the catalog payload pre-generated for its named schema
//!
//! A malformed tier-1/2 example is logged and skipped. An inline body schema cannot be looked
//! up in the catalog and fails the conversion.

mod decode;
mod generator;

pub use decode::decode_example;
pub use generator::{dummy_value, ExampleGenerator, SchemaExampleGenerator, DEFAULT_EXAMPLE_DEPTH};

use crate::error::{ConvertError, Result};
use crate::spec::{MediaTypeMeta, SchemaGraph, SchemaNode, SchemaRef};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Anything that can carry inline example values
pub trait ExampleHolder {
    /// The singular `example`
    fn example(&self) -> Option<&serde_yaml::Value>;
    /// The plural `examples`, in declaration order
    fn examples(&self) -> &[serde_yaml::Value];
}

impl ExampleHolder for MediaTypeMeta {
    fn example(&self) -> Option<&serde_yaml::Value> {
        self.example.as_ref()
    }

    fn examples(&self) -> &[serde_yaml::Value] {
        &self.examples
    }
}

impl ExampleHolder for SchemaNode {
    fn example(&self) -> Option<&serde_yaml::Value> {
        self.example.as_ref()
    }

    fn examples(&self) -> &[serde_yaml::Value] {
        &self.examples
    }
}

fn decode_or_warn(raw: &serde_yaml::Value, source: &str) -> Option<JsonValue> {
    match decode_example(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, source, "ignoring malformed example");
            None
        }
    }
}

/// The holder's own example: `example` first, then the first of `examples`
pub fn explicit_example<H: ExampleHolder + ?Sized>(holder: &H) -> Option<JsonValue> {
    holder
        .example()
        .and_then(|raw| decode_or_warn(raw, "example"))
        .or_else(|| {
            holder
                .examples()
                .first()
                .and_then(|raw| decode_or_warn(raw, "examples"))
        })
}

/// Payloads generated once per component schema, keyed by schema name
#[derive(Debug, Clone, Default)]
pub struct ExampleCatalog {
    examples: HashMap<String, JsonValue>,
}

impl ExampleCatalog {
    /// Generate a payload for every schema in the graph
    ///
    /// Schemas the generator cannot handle are logged and left out.
    pub fn build<G: ExampleGenerator + ?Sized>(graph: &SchemaGraph, generator: &G) -> Self {
        let mut examples = HashMap::with_capacity(graph.len());
        for name in graph.names() {
            match generator.generate(graph, name) {
                Ok(value) => {
                    examples.insert(name.to_string(), value);
                }
                Err(err) => warn!(schema = %name, error = %err, "could not generate example"),
            }
        }
        debug!(generated = examples.len(), schemas = graph.len(), "built example catalog");
        Self { examples }
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.examples.get(name)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

impl FromIterator<(String, JsonValue)> for ExampleCatalog {
    fn from_iter<T: IntoIterator<Item = (String, JsonValue)>>(iter: T) -> Self {
        Self {
            examples: iter.into_iter().collect(),
        }
    }
}

/// Look up the payload for a body schema
///
/// # Errors
///
/// [`ConvertError::UnsupportedSchema`] for an inline schema; `context` names the site.
pub fn resolve_schema_example(
    schema: Option<&SchemaRef>,
    catalog: &ExampleCatalog,
    context: &str,
) -> Result<Option<JsonValue>> {
    match schema {
        None => Ok(None),
        Some(SchemaRef::Inline(_)) => Err(ConvertError::UnsupportedSchema {
            context: context.to_string(),
        }),
        Some(SchemaRef::Named(name)) => Ok(catalog.get(name).cloned()),
    }
}

/// Resolve the example shown for a request or response body
pub fn resolve_body_example(
    media: &MediaTypeMeta,
    catalog: &ExampleCatalog,
    context: &str,
) -> Result<Option<JsonValue>> {
    if let Some(value) = explicit_example(media) {
        return Ok(Some(value));
    }
    resolve_schema_example(media.schema.as_ref(), catalog, context)
}

/// Pretty-print a payload with three-space indentation
pub fn format_example(value: &JsonValue) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"   ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}
