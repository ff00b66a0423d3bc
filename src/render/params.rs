use crate::spec::{literal_text, ParameterLocation, ParameterMeta, SchemaGraph, SchemaNode, SchemaRef};

fn parameter_schema<'a>(graph: &'a SchemaGraph, param: &'a ParameterMeta) -> Option<&'a SchemaNode> {
    match param.schema.as_ref()? {
        SchemaRef::Named(name) => graph.get(name),
        SchemaRef::Inline(node) => Some(node),
    }
}

fn write_bullet_section(out: &mut String, graph: &SchemaGraph, heading: &str, params: &[&ParameterMeta]) {
    if params.is_empty() {
        return;
    }
    out.push_str(heading);
    for param in params {
        if let Some(schema) = parameter_schema(graph, param) {
            out.push_str("- `");
            out.push_str(&param.name);
            out.push_str("` *(");
            out.push_str(schema.declared_type().unwrap_or(""));
            if param.required {
                out.push_str(", required");
            }
            out.push_str(")*");
            if let Some(description) = &param.description {
                out.push(' ');
                out.push_str(description);
            }
            if !schema.enum_values.is_empty() {
                let quoted: Vec<String> = schema
                    .enum_values
                    .iter()
                    .map(|v| format!("`{}`", literal_text(v)))
                    .collect();
                out.push_str(" Enums: ");
                out.push_str(&quoted.join(", "));
            }
            out.push('\n');
        }
        out.push('\n');
    }
}

fn write_header_table(out: &mut String, graph: &SchemaGraph, params: &[&ParameterMeta]) {
    if params.is_empty() {
        return;
    }
    out.push_str("#### Headers\n\n");
    out.push_str("Name | Description | Required | Type\n");
    out.push_str("-----|-------------|----------|-----\n");
    for param in params {
        let ty = parameter_schema(graph, param)
            .and_then(SchemaNode::declared_type)
            .unwrap_or("");
        out.push_str(&format!(
            "{} | {} | {} | {ty}\n",
            param.name,
            param.description.as_deref().unwrap_or(""),
            param.required
        ));
    }
    out.push('\n');
}

/// Render path and query parameters as bullet lists and headers as a table
///
/// Cookie parameters are not documented.
pub fn render_parameters(out: &mut String, graph: &SchemaGraph, parameters: &[ParameterMeta]) {
    let at = |location: ParameterLocation| {
        parameters
            .iter()
            .filter(|p| p.location == location)
            .collect::<Vec<_>>()
    };

    write_bullet_section(out, graph, "#### Path Parameters\n\n", &at(ParameterLocation::Path));
    write_bullet_section(out, graph, "#### Query Parameters\n\n", &at(ParameterLocation::Query));
    write_header_table(out, graph, &at(ParameterLocation::Header));
}
