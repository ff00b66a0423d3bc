use super::{make_schema_anchor, Renderer};
use crate::error::Result;
use crate::extract::{extract_fields, FieldDescriptor, SchemaDefinition, VisitState};
use crate::spec::{SchemaNode, SchemaRef};

fn write_enums(out: &mut String, prefix: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    out.push_str(prefix);
    let quoted: Vec<String> = values.iter().map(|v| format!("`{v}`")).collect();
    out.push_str(&quoted.join(", "));
}

fn write_bullet_head(out: &mut String, field: &FieldDescriptor) {
    out.push_str("- `");
    out.push_str(&field.name);
    out.push('`');
    if let Some(label) = field.type_label() {
        out.push_str(" *(");
        out.push_str(&label);
        if field.required {
            out.push_str(", required");
        }
        out.push_str(")*");
    }
}

/// Write a top-level field list followed by a blank line
///
/// `` - `name` *(label, required)* description Enums: `a`, `b` ``
pub fn write_field_bullets(out: &mut String, fields: &[FieldDescriptor]) {
    for field in fields {
        write_bullet_head(out, field);
        if !field.description.is_empty() {
            out.push(' ');
            out.push_str(&field.description);
        }
        write_enums(out, " Enums: ", &field.enum_values);
        out.push('\n');
    }
    out.push('\n');
}

/// Write one nested definition section
///
/// Nested bullets use `: description` and only list enums after a description.
pub fn write_schema_definition(out: &mut String, definition: &SchemaDefinition) {
    out.push_str("**");
    out.push_str(&definition.name);
    out.push_str("**\n");
    for field in &definition.fields {
        write_bullet_head(out, field);
        if !field.description.is_empty() {
            out.push_str(": ");
            out.push_str(&field.description);
            write_enums(out, ". Enums: ", &field.enum_values);
        }
        out.push('\n');
    }
    out.push('\n');
}

impl Renderer<'_> {
    /// Render field definitions for a body schema
    ///
    /// A shared schema is replaced by a reference to its section; the shared check runs before
    /// anything else, recursive schemas included.
    pub fn render_schema_fields(
        &mut self,
        out: &mut String,
        schema: &SchemaRef,
        visits: &mut VisitState,
        subject: &str,
    ) -> Result<()> {
        if let Some(name) = schema.name() {
            if self.shared.contains_key(name) {
                out.push_str(&format!("See [{name}](#{})\n\n", make_schema_anchor(name)));
                return Ok(());
            }
        }
        self.render_schema_body(out, schema, visits, subject)
    }

    /// Render field definitions without the shared-schema check
    pub(crate) fn render_schema_body(
        &mut self,
        out: &mut String,
        schema: &SchemaRef,
        visits: &mut VisitState,
        subject: &str,
    ) -> Result<()> {
        let graph = self.graph;
        let node = graph.resolve(schema)?;
        if !node.one_of.is_empty() {
            return self.render_union(out, schema, node, visits, subject);
        }

        let extraction = extract_fields(graph, schema, visits, self.max_depth)?;
        if extraction.is_empty() {
            return Ok(());
        }
        self.note_undocumented(&extraction.fields, schema.name());
        write_field_bullets(out, &extraction.fields);
        for definition in &extraction.definitions {
            write_schema_definition(out, definition);
        }
        Ok(())
    }

    fn render_union(
        &mut self,
        out: &mut String,
        schema: &SchemaRef,
        node: &SchemaNode,
        visits: &mut VisitState,
        subject: &str,
    ) -> Result<()> {
        if let Some(field) = &node.discriminator {
            out.push_str(&format!(
                "{subject} is one of the following variants, selected by the `{field}` field:\n\n"
            ));
        }

        if let Some(name) = schema.name() {
            visits.enter(name);
        }
        let mut result = Ok(());
        for variant in &node.one_of {
            if let Some(name) = variant.name() {
                out.push_str(&format!("**{name}**\n"));
            }
            result = self.render_schema_fields(out, variant, visits, subject);
            if result.is_err() {
                break;
            }
        }
        if let Some(name) = schema.name() {
            visits.leave(name);
        }
        result
    }

    fn note_undocumented(&mut self, fields: &[FieldDescriptor], schema: Option<&str>) {
        for field in fields {
            if field.description.is_empty() && !field.is_object {
                let message = match schema {
                    Some(name) => format!("field '{}' of {name} is missing a description", field.name),
                    None => format!("field '{}' is missing a description", field.name),
                };
                self.warn(message);
            }
        }
    }
}
