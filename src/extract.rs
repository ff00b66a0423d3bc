//! Field extraction
//!
//! Flattens a schema into the field descriptors shown in a "Field Definitions" block, plus the
//! nested definition sections for named object schemas reached through its properties.
//!
//! Traversal is bounded two ways. A named schema is expanded at most twice on the current path
//! (so a self-referencing schema shows exactly one nested section), and no expansion starts once
//! the path already holds `max_depth` named schemas.

use crate::error::Result;
use crate::spec::{literal_text, Property, SchemaGraph, SchemaNode, SchemaRef};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Default ceiling on nested named-schema expansion
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// One documented property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Scalar type, item type for arrays, or `object`; empty when the schema declares none
    pub type_name: String,
    pub required: bool,
    pub description: String,
    pub enum_values: Vec<String>,
    pub is_array: bool,
    pub is_object: bool,
    /// Name of the referenced object (or array item) schema, if any
    pub schema_ref: String,
}

impl FieldDescriptor {
    /// The label shown inside `*( ... )*`, or `None` when the field has no type
    pub fn type_label(&self) -> Option<String> {
        if self.type_name.is_empty() {
            return None;
        }
        let label = match (self.is_array, self.is_object) {
            (true, true) if !self.schema_ref.is_empty() => format!("array of {}", self.schema_ref),
            (true, true) => "array of objects".to_string(),
            (true, false) => format!("{} array", self.type_name),
            (false, true) if !self.schema_ref.is_empty() => self.schema_ref.clone(),
            (false, true) => "object".to_string(),
            (false, false) => self.type_name.clone(),
        };
        Some(label)
    }
}

/// A nested object section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Output of [`extract_fields`]: top-level fields and flattened nested sections (depth-first)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub fields: Vec<FieldDescriptor>,
    pub definitions: Vec<SchemaDefinition>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Named schemas currently on the traversal path
///
/// Entering a schema increments its count and the depth; leaving undoes both, so sibling
/// subtrees never see each other's visits.
#[derive(Debug, Clone, Default)]
pub struct VisitState {
    counts: HashMap<String, usize>,
    depth: usize,
}

impl VisitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `name` is on the current path
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of named schemas on the current path
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
        self.depth += 1;
    }

    pub(crate) fn leave(&mut self, name: &str) {
        if let Some(count) = self.counts.get_mut(name) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.counts.remove(name);
            }
        }
        self.depth = self.depth.saturating_sub(1);
    }
}

/// The effective property set of a schema after folding in its `allOf` members
#[derive(Debug, Clone, Default)]
pub struct MergedProperties<'a> {
    pub properties: Vec<&'a Property>,
    pub required: HashSet<&'a str>,
}

impl<'a> MergedProperties<'a> {
    fn set(&mut self, property: &'a Property) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(slot) => *slot = property,
            None => self.properties.push(property),
        }
    }

    fn absorb(&mut self, node: &'a SchemaNode) {
        for property in &node.properties {
            self.set(property);
        }
        self.required.extend(node.required.iter().map(String::as_str));
    }
}

/// Merge a schema's `allOf` members with its own properties
///
/// Members are folded in order; the schema's own properties are applied last and win on name
/// collision while keeping the position of the first occurrence. Required sets are unioned.
///
/// # Errors
///
/// Fails with a structural error when a named member has no body.
pub fn merge_all_of<'a>(graph: &'a SchemaGraph, node: &'a SchemaNode) -> Result<MergedProperties<'a>> {
    let mut merged = MergedProperties::default();
    for member in &node.all_of {
        merged.absorb(graph.resolve(member)?);
    }
    merged.absorb(node);
    Ok(merged)
}

/// Extract documented fields for a schema
///
/// # Arguments
///
/// * `graph` - Named component schemas
/// * `schema` - The schema to flatten
/// * `visits` - Named schemas already on the current path
/// * `max_depth` - Ceiling on nested named-schema expansion
///
/// # Returns
///
/// The schema's fields and nested definitions. Empty when the schema is already expanded twice
/// on the path, the depth ceiling is reached, or the schema has no properties.
pub fn extract_fields(
    graph: &SchemaGraph,
    schema: &SchemaRef,
    visits: &mut VisitState,
    max_depth: usize,
) -> Result<Extraction> {
    if let Some(name) = schema.name() {
        if visits.count(name) > 1 {
            debug!(schema = %name, "recursion limit reached, not expanding");
            return Ok(Extraction::default());
        }
    }
    if visits.depth() >= max_depth {
        debug!(depth = visits.depth(), max_depth, "depth limit reached, not expanding");
        return Ok(Extraction::default());
    }

    let node = graph.resolve(schema)?;
    let merged = merge_all_of(graph, node)?;
    if merged.properties.is_empty() {
        return Ok(Extraction::default());
    }

    if let Some(name) = schema.name() {
        visits.enter(name);
    }
    let result = extract_properties(graph, &merged, visits, max_depth);
    if let Some(name) = schema.name() {
        visits.leave(name);
    }
    result
}

fn extract_properties(
    graph: &SchemaGraph,
    merged: &MergedProperties<'_>,
    visits: &mut VisitState,
    max_depth: usize,
) -> Result<Extraction> {
    let mut extraction = Extraction::default();

    for property in &merged.properties {
        let Some(prop_ref) = property.schema.as_ref() else {
            debug!(property = %property.name, "property has no readable schema, skipping");
            continue;
        };
        let prop = graph.resolve(prop_ref)?;

        let mut field = FieldDescriptor {
            name: property.name.clone(),
            required: merged.required.contains(property.name.as_str()),
            description: prop.description.clone().unwrap_or_default(),
            enum_values: prop.enum_values.iter().map(literal_text).collect(),
            ..FieldDescriptor::default()
        };

        match prop.declared_type() {
            Some("array") => {
                field.type_name = "array".to_string();
                if let Some(items) = prop.items.as_deref() {
                    let item = graph.resolve(items)?;
                    field.is_array = true;
                    if let Some(item_type) = item.declared_type() {
                        field.type_name = item_type.to_string();
                    }
                    match items.name() {
                        Some(item_name) => {
                            field.is_object = true;
                            field.schema_ref = item_name.to_string();
                            expand_nested(graph, items, item_name, visits, max_depth, &mut extraction)?;
                        }
                        None if item.declared_type() == Some("object") => field.is_object = true,
                        // Untyped inline items: keep the plain "array" label
                        None if item.declared_type().is_none() => field.is_array = false,
                        None => {}
                    }
                }
            }
            Some("object") => {
                field.type_name = "object".to_string();
                field.is_object = true;
                if let Some(name) = prop_ref.name() {
                    field.schema_ref = name.to_string();
                    expand_nested(graph, prop_ref, name, visits, max_depth, &mut extraction)?;
                }
            }
            Some(other) => field.type_name = other.to_string(),
            None => {
                // A named union has no type of its own; label it with its name
                if let (Some(name), false) = (prop_ref.name(), prop.one_of.is_empty()) {
                    field.type_name = "object".to_string();
                    field.is_object = true;
                    field.schema_ref = name.to_string();
                }
            }
        }

        extraction.fields.push(field);
    }

    Ok(extraction)
}

/// Expand a named object schema into a nested section, followed by its own nested sections
fn expand_nested(
    graph: &SchemaGraph,
    schema: &SchemaRef,
    name: &str,
    visits: &mut VisitState,
    max_depth: usize,
    out: &mut Extraction,
) -> Result<()> {
    let nested = extract_fields(graph, schema, visits, max_depth)?;
    if nested.fields.is_empty() {
        return Ok(());
    }
    out.definitions.push(SchemaDefinition {
        name: name.to_string(),
        fields: nested.fields,
    });
    out.definitions.extend(nested.definitions);
    Ok(())
}
