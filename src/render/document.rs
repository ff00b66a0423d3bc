use super::{make_anchor, render_parameters, Renderer};
use crate::error::Result;
use crate::example::{format_example, resolve_body_example};
use crate::extract::VisitState;
use crate::spec::{ApiDocument, Endpoint, ResponseMeta, SchemaRef};
use crate::usage::identify_shared_response_schemas;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashSet};

/// Group that collects endpoints without tags; always rendered last
pub const DEFAULT_TAG: &str = "Default APIs";

/// Tag name to endpoints, in the order sections are rendered
pub type TagGroups<'e> = Vec<(String, Vec<&'e Endpoint>)>;

/// Group endpoints by tag
///
/// An endpoint with several tags appears under each of them; untagged endpoints go under
/// [`DEFAULT_TAG`]. Groups are sorted by name with the default group moved to the end.
pub fn group_by_tags(endpoints: &[Endpoint]) -> TagGroups<'_> {
    let mut groups: BTreeMap<&str, Vec<&Endpoint>> = BTreeMap::new();
    for endpoint in endpoints {
        if endpoint.tags.is_empty() {
            groups.entry(DEFAULT_TAG).or_default().push(endpoint);
        } else {
            for tag in &endpoint.tags {
                groups.entry(tag.as_str()).or_default().push(endpoint);
            }
        }
    }

    let default_group = groups.remove(DEFAULT_TAG);
    let mut ordered: TagGroups<'_> = groups
        .into_iter()
        .map(|(tag, members)| (tag.to_string(), members))
        .collect();
    if let Some(members) = default_group {
        ordered.push((DEFAULT_TAG.to_string(), members));
    }
    ordered
}

fn write_example_block(out: &mut String, example: &JsonValue) {
    out.push_str("```json\n");
    out.push_str(&format_example(example));
    out.push_str("\n```\n\n");
}

impl Renderer<'_> {
    /// Render the complete document
    ///
    /// # Arguments
    ///
    /// * `document` - The loaded document
    /// * `title` - Top-level heading
    /// * `description` - Optional paragraph under the heading (skipped when empty)
    /// * `tag_groups` - Output of [`group_by_tags`] for `document.endpoints`
    pub fn render_document(
        &mut self,
        document: &ApiDocument,
        title: &str,
        description: &str,
        tag_groups: &TagGroups<'_>,
    ) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!("# {title}\n\n"));
        if !description.is_empty() {
            out.push_str(description);
            out.push_str("\n\n");
        }

        if document.endpoints.is_empty() {
            return Ok(out);
        }

        self.render_table_of_contents(&mut out, &document.endpoints);

        if tag_groups.len() > 1 {
            for (tag, members) in tag_groups {
                out.push_str(&format!("## {tag}\n\n"));
                for endpoint in members {
                    self.render_endpoint(&mut out, endpoint, "###")?;
                }
            }
        } else {
            for endpoint in &document.endpoints {
                self.render_endpoint(&mut out, endpoint, "##")?;
            }
        }

        self.render_shared_definitions(&mut out)?;
        Ok(out)
    }

    fn render_table_of_contents(&self, out: &mut String, endpoints: &[Endpoint]) {
        out.push_str("## Table of Contents\n\n");
        out.push_str("HTTP Request | Description\n");
        out.push_str("-------------|------------\n");
        for endpoint in endpoints {
            let method = endpoint.method.as_str();
            out.push_str(&format!(
                "{method} [{}](#{}) | {}\n",
                endpoint.path,
                make_anchor(method, &endpoint.path),
                endpoint.summary.as_deref().unwrap_or("")
            ));
        }
        out.push('\n');
    }

    fn render_endpoint(&mut self, out: &mut String, endpoint: &Endpoint, heading: &str) -> Result<()> {
        out.push_str(&format!("{heading} {} {}\n\n", endpoint.method, endpoint.path));

        match endpoint.description.as_ref().or(endpoint.summary.as_ref()) {
            Some(text) => {
                out.push_str(text);
                out.push_str("\n\n");
            }
            None => self.warn(format!(
                "no description or summary for {}",
                endpoint.key()
            )),
        }

        render_parameters(out, self.graph, &endpoint.parameters);
        self.render_request_body(out, endpoint)?;
        self.render_responses(out, endpoint)
    }

    fn render_request_body(&mut self, out: &mut String, endpoint: &Endpoint) -> Result<()> {
        let Some(body) = &endpoint.request_body else {
            return Ok(());
        };
        let json = body.json();
        let example = match json {
            Some(media) => resolve_body_example(
                media,
                self.catalog,
                &format!("{} request body", endpoint.key()),
            )?,
            None => None,
        };
        let schema = json.and_then(|media| media.schema.as_ref());
        if example.is_none() && schema.is_none() {
            return Ok(());
        }

        out.push_str("### Request\n\n");
        if let Some(example) = &example {
            write_example_block(out, example);
        }
        if let Some(schema) = schema {
            self.render_field_definitions(out, schema, "#### Field Definitions\n\n", "Request body")?;
        }
        Ok(())
    }

    fn render_responses(&mut self, out: &mut String, endpoint: &Endpoint) -> Result<()> {
        if endpoint.responses.is_empty() {
            return Ok(());
        }
        out.push_str("### Responses\n\n");

        let mut responses: Vec<&ResponseMeta> = endpoint.responses.iter().collect();
        responses.sort_by(|a, b| a.status.cmp(&b.status));
        let shared_codes = identify_shared_response_schemas(endpoint);
        let mut rendered: HashSet<&str> = HashSet::new();

        for response in responses {
            out.push_str(&format!("#### {} Response\n\n", response.status));
            if let Some(description) = &response.description {
                out.push_str(description);
                out.push_str("\n\n");
            }

            let json = response.json();
            if let Some(media) = json {
                let context = format!("{} {} response", endpoint.key(), response.status);
                if let Some(example) = resolve_body_example(media, self.catalog, &context)? {
                    write_example_block(out, &example);
                }
            }

            if !response.is_success() {
                continue;
            }
            let Some(schema) = json.and_then(|media| media.schema.as_ref()) else {
                continue;
            };
            let Some(name) = schema.name() else {
                continue;
            };
            match shared_codes.get(name) {
                Some(codes) => {
                    if rendered.insert(name) {
                        let heading = format!(
                            "#### Field Definitions (applies to {} responses)\n\n",
                            codes.join(", ")
                        );
                        self.render_field_definitions(out, schema, &heading, "Response body")?;
                    }
                }
                None => {
                    self.render_field_definitions(out, schema, "#### Field Definitions\n\n", "Response body")?
                }
            }
        }
        Ok(())
    }

    /// Write `heading` and the field definitions of a named body schema, if there are any
    fn render_field_definitions(
        &mut self,
        out: &mut String,
        schema: &SchemaRef,
        heading: &str,
        subject: &str,
    ) -> Result<()> {
        if !schema.is_named() {
            return Ok(());
        }
        let mut content = String::new();
        let mut visits = VisitState::new();
        self.render_schema_fields(&mut content, schema, &mut visits, subject)?;
        if !content.is_empty() {
            out.push_str(heading);
            out.push_str(&content);
        }
        Ok(())
    }

    /// Render one section per shared schema, sorted by name
    fn render_shared_definitions(&mut self, out: &mut String) -> Result<()> {
        let shared = self.shared;
        if shared.is_empty() {
            return Ok(());
        }
        out.push_str("## Shared Schema Definitions\n\n");
        for (name, usage) in shared {
            out.push_str(&format!("### {name}\n\n"));
            if !usage.endpoints.is_empty() {
                out.push_str(&format!("Used in: {}\n\n", usage.endpoints.join(", ")));
            }
            let schema = SchemaRef::Named(name.clone());
            let mut visits = VisitState::new();
            self.render_schema_body(out, &schema, &mut visits, name)?;
        }
        Ok(())
    }
}
