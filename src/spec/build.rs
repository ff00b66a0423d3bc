use super::types::{
    ApiDocument, Endpoint, MediaTypeMeta, ParameterLocation, ParameterMeta, Property,
    RequestBodyMeta, ResponseMeta, SchemaGraph, SchemaNode, SchemaRef, SCHEMA_REF_PREFIX,
};
use crate::error::{ConvertError, Result};
use http::Method;
use serde_yaml::{Mapping, Value as YamlValue};
use tracing::debug;

const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";
const REQUEST_BODY_REF_PREFIX: &str = "#/components/requestBodies/";
const RESPONSE_REF_PREFIX: &str = "#/components/responses/";
const EXAMPLE_REF_PREFIX: &str = "#/components/examples/";

/// Operation keys in the order endpoints of one path are emitted
const METHODS: [(&str, Method); 8] = [
    ("get", Method::GET),
    ("put", Method::PUT),
    ("post", Method::POST),
    ("delete", Method::DELETE),
    ("options", Method::OPTIONS),
    ("head", Method::HEAD),
    ("patch", Method::PATCH),
    ("trace", Method::TRACE),
];

/// Hops allowed when a component schema or object is itself a `$ref` to another one
const MAX_ALIAS_HOPS: usize = 16;

/// Extract the component name from a schema `$ref`
///
/// # Arguments
///
/// * `ref_path` - The `$ref` path (e.g., `#/components/schemas/Pet`)
///
/// # Returns
///
/// `Some("Pet")`, or `None` when the reference does not point at a component schema
pub fn schema_name_from_ref(ref_path: &str) -> Option<&str> {
    ref_path
        .strip_prefix(SCHEMA_REF_PREFIX)
        .filter(|name| !name.is_empty())
}

/// Read a mapping key as text; YAML allows unquoted numeric keys like `200:`
pub fn key_text(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text(map: &Mapping, key: &str) -> Option<String> {
    map.get(key)
        .and_then(YamlValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(map: &Mapping, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(YamlValue::as_sequence)
        .map(|items| {
            items
                .iter()
                .filter_map(YamlValue::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn ref_path(map: &Mapping) -> Option<&str> {
    map.get("$ref").and_then(YamlValue::as_str)
}

fn model_error(location: &str, message: impl std::fmt::Display) -> ConvertError {
    ConvertError::ModelBuild(format!("{location}: {message}"))
}

/// Builds the schema graph and endpoint list from a parsed document root
///
/// All mapping iteration follows document order, so properties, parameters, responses and
/// media types come out the way they were declared.
struct DocumentBuilder<'a> {
    components: Option<&'a Mapping>,
}

impl<'a> DocumentBuilder<'a> {
    fn component_section(&self, section: &str) -> Option<&'a Mapping> {
        self.components?.get(section)?.as_mapping()
    }

    /// Follow `$ref` chains inside one component section until an object is reached
    fn resolve_component(
        &self,
        section: &str,
        prefix: &str,
        map: &'a Mapping,
        location: &str,
    ) -> Result<&'a Mapping> {
        let mut current = map;
        for _ in 0..MAX_ALIAS_HOPS {
            let Some(reference) = ref_path(current) else {
                return Ok(current);
            };
            let name = reference
                .strip_prefix(prefix)
                .ok_or_else(|| model_error(location, format!("unsupported reference '{reference}'")))?;
            current = self
                .component_section(section)
                .and_then(|entries| entries.get(name))
                .and_then(YamlValue::as_mapping)
                .ok_or_else(|| model_error(location, format!("unresolved reference '{reference}'")))?;
        }
        Err(model_error(location, "reference chain too long"))
    }

    fn schema_ref(&self, value: &YamlValue, location: &str) -> Result<Option<SchemaRef>> {
        let Some(map) = value.as_mapping() else {
            return Ok(None);
        };
        if let Some(reference) = ref_path(map) {
            let name = schema_name_from_ref(reference).ok_or_else(|| {
                model_error(location, format!("unsupported schema reference '{reference}'"))
            })?;
            let known = self
                .component_section("schemas")
                .is_some_and(|schemas| schemas.contains_key(name));
            if !known {
                return Err(model_error(
                    location,
                    format!("unresolved schema reference '{reference}'"),
                ));
            }
            return Ok(Some(SchemaRef::Named(name.to_string())));
        }
        Ok(Some(SchemaRef::Inline(Box::new(
            self.schema_node(map, location)?,
        ))))
    }

    fn schema_list(&self, map: &Mapping, key: &str, location: &str) -> Result<Vec<SchemaRef>> {
        let Some(members) = map.get(key).and_then(YamlValue::as_sequence) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            if let Some(schema) = self.schema_ref(member, &format!("{location}/{key}/{index}"))? {
                out.push(schema);
            }
        }
        Ok(out)
    }

    fn schema_node(&self, map: &Mapping, location: &str) -> Result<SchemaNode> {
        let schema_type = match map.get("type") {
            Some(YamlValue::String(ty)) => Some(ty.clone()),
            // OpenAPI 3.1 type arrays: the first non-null entry names the type
            Some(YamlValue::Sequence(types)) => {
                let names: Vec<&str> = types.iter().filter_map(YamlValue::as_str).collect();
                names
                    .iter()
                    .find(|ty| **ty != "null")
                    .or_else(|| names.first())
                    .map(|ty| ty.to_string())
            }
            _ => None,
        };

        let mut properties = Vec::new();
        if let Some(props) = map.get("properties").and_then(YamlValue::as_mapping) {
            for (key, value) in props {
                let Some(name) = key_text(key) else {
                    return Err(model_error(location, "property names must be scalars"));
                };
                let schema = self.schema_ref(value, &format!("{location}/properties/{name}"))?;
                properties.push(Property { name, schema });
            }
        }

        let items = match map.get("items") {
            Some(value) => self
                .schema_ref(value, &format!("{location}/items"))?
                .map(Box::new),
            None => None,
        };

        let examples = match map.get("examples") {
            Some(YamlValue::Sequence(values)) => values.clone(),
            Some(YamlValue::Mapping(values)) => values.values().cloned().collect(),
            _ => Vec::new(),
        };

        Ok(SchemaNode {
            schema_type,
            format: text(map, "format"),
            description: text(map, "description"),
            properties,
            required: string_list(map, "required"),
            enum_values: map
                .get("enum")
                .and_then(YamlValue::as_sequence)
                .cloned()
                .unwrap_or_default(),
            items,
            all_of: self.schema_list(map, "allOf", location)?,
            one_of: self.schema_list(map, "oneOf", location)?,
            discriminator: map
                .get("discriminator")
                .and_then(YamlValue::as_mapping)
                .and_then(|d| text(d, "propertyName")),
            default: map.get("default").cloned(),
            example: map.get("example").cloned(),
            examples,
        })
    }

    fn schema_graph(&self) -> Result<SchemaGraph> {
        let mut graph = SchemaGraph::new();
        let Some(schemas) = self.component_section("schemas") else {
            return Ok(graph);
        };
        for (key, value) in schemas {
            let Some(name) = key_text(key) else {
                return Err(model_error("components/schemas", "schema names must be scalars"));
            };
            let location = format!("{SCHEMA_REF_PREFIX}{name}");
            let Some(map) = value.as_mapping() else {
                debug!(schema = %name, "skipping non-object component schema");
                continue;
            };
            let body = self.resolve_component("schemas", SCHEMA_REF_PREFIX, map, &location)?;
            graph.insert(name, self.schema_node(body, &location)?);
        }
        Ok(graph)
    }

    /// Collect `value`s of a media type's `examples` map, resolving component examples
    fn named_examples(&self, map: &Mapping, location: &str) -> Result<Vec<YamlValue>> {
        let Some(examples) = map.get("examples").and_then(YamlValue::as_mapping) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        for (key, entry) in examples {
            let Some(entry) = entry.as_mapping() else {
                continue;
            };
            let name = key_text(key).unwrap_or_default();
            let entry = self.resolve_component(
                "examples",
                EXAMPLE_REF_PREFIX,
                entry,
                &format!("{location}/examples/{name}"),
            )?;
            if let Some(value) = entry.get("value") {
                out.push(value.clone());
            }
        }
        Ok(out)
    }

    fn content(&self, map: &Mapping, location: &str) -> Result<Vec<MediaTypeMeta>> {
        let Some(content) = map.get("content").and_then(YamlValue::as_mapping) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(content.len());
        for (key, media) in content {
            let (Some(content_type), Some(media)) = (key_text(key), media.as_mapping()) else {
                continue;
            };
            let media_location = format!("{location}/content/{content_type}");
            let schema = match media.get("schema") {
                Some(value) => self.schema_ref(value, &format!("{media_location}/schema"))?,
                None => None,
            };
            out.push(MediaTypeMeta {
                schema,
                example: media.get("example").cloned(),
                examples: self.named_examples(media, &media_location)?,
                content_type,
            });
        }
        Ok(out)
    }

    fn parameters(&self, map: &Mapping, location: &str) -> Result<Vec<ParameterMeta>> {
        let Some(params) = map.get("parameters").and_then(YamlValue::as_sequence) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(params.len());
        for (index, param) in params.iter().enumerate() {
            let param_location = format!("{location}/parameters/{index}");
            let Some(param) = param.as_mapping() else {
                continue;
            };
            let param = self.resolve_component(
                "parameters",
                PARAMETER_REF_PREFIX,
                param,
                &param_location,
            )?;
            let name = text(param, "name")
                .ok_or_else(|| model_error(&param_location, "parameter without a name"))?;
            let location_value = param.get("in").and_then(YamlValue::as_str).unwrap_or("");
            let parameter_location = ParameterLocation::parse(location_value).ok_or_else(|| {
                model_error(
                    &param_location,
                    format!("unknown parameter location '{location_value}'"),
                )
            })?;
            let schema = match param.get("schema") {
                Some(value) => self.schema_ref(value, &format!("{param_location}/schema"))?,
                None => None,
            };
            out.push(ParameterMeta {
                name,
                location: parameter_location,
                required: param
                    .get("required")
                    .and_then(YamlValue::as_bool)
                    .unwrap_or(false),
                description: text(param, "description"),
                schema,
            });
        }
        Ok(out)
    }

    fn request_body(&self, operation: &Mapping, location: &str) -> Result<Option<RequestBodyMeta>> {
        let Some(body) = operation.get("requestBody").and_then(YamlValue::as_mapping) else {
            return Ok(None);
        };
        let body_location = format!("{location}/requestBody");
        let body = self.resolve_component(
            "requestBodies",
            REQUEST_BODY_REF_PREFIX,
            body,
            &body_location,
        )?;
        Ok(Some(RequestBodyMeta {
            description: text(body, "description"),
            content: self.content(body, &body_location)?,
        }))
    }

    fn responses(&self, operation: &Mapping, location: &str) -> Result<Vec<ResponseMeta>> {
        let Some(responses) = operation.get("responses").and_then(YamlValue::as_mapping) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(responses.len());
        for (key, response) in responses {
            let Some(status) = key_text(key) else {
                continue;
            };
            let response_location = format!("{location}/responses/{status}");
            let Some(response) = response.as_mapping() else {
                return Err(model_error(&response_location, "response must be an object"));
            };
            let response = self.resolve_component(
                "responses",
                RESPONSE_REF_PREFIX,
                response,
                &response_location,
            )?;
            out.push(ResponseMeta {
                description: text(response, "description"),
                content: self.content(response, &response_location)?,
                status,
            });
        }
        Ok(out)
    }

    fn endpoints(&self, paths: Option<&Mapping>) -> Result<Vec<Endpoint>> {
        let mut endpoints = Vec::new();
        let Some(paths) = paths else {
            return Ok(endpoints);
        };
        for (key, item) in paths {
            let (Some(path), Some(item)) = (key_text(key), item.as_mapping()) else {
                continue;
            };
            let shared_parameters = self.parameters(item, &path)?;
            for (method_key, method) in &METHODS {
                let Some(operation) = item.get(*method_key).and_then(YamlValue::as_mapping) else {
                    continue;
                };
                let location = format!("{path} {method}");
                let mut parameters = shared_parameters.clone();
                for param in self.parameters(operation, &location)? {
                    // Operation-level parameters override path-level ones with the same identity
                    parameters.retain(|p| !(p.name == param.name && p.location == param.location));
                    parameters.push(param);
                }
                endpoints.push(Endpoint {
                    method: method.clone(),
                    path: path.clone(),
                    summary: text(operation, "summary"),
                    description: text(operation, "description"),
                    tags: string_list(operation, "tags"),
                    parameters,
                    request_body: self.request_body(operation, &location)?,
                    responses: self.responses(operation, &location)?,
                });
            }
        }
        Ok(endpoints)
    }
}

/// Build the document model from a parsed, version-checked document root
///
/// # Arguments
///
/// * `root` - The document root mapping
/// * `openapi` - The declared OpenAPI version
///
/// # Errors
///
/// Returns [`ConvertError::ModelBuild`] for references that cannot be resolved and for
/// objects that do not have the shape OpenAPI 3.x requires.
pub fn build_document(root: &Mapping, openapi: &str) -> Result<ApiDocument> {
    let builder = DocumentBuilder {
        components: root.get("components").and_then(YamlValue::as_mapping),
    };
    let info = root.get("info").and_then(YamlValue::as_mapping);
    let paths = root.get("paths").and_then(YamlValue::as_mapping);

    let schemas = builder.schema_graph()?;
    let endpoints = builder.endpoints(paths)?;
    debug!(
        schemas = schemas.len(),
        endpoints = endpoints.len(),
        "built document model"
    );

    Ok(ApiDocument {
        openapi: openapi.to_string(),
        title: info.and_then(|i| text(i, "title")).unwrap_or_default(),
        description: info.and_then(|i| text(i, "description")),
        path_count: paths.map(Mapping::len).unwrap_or(0),
        endpoints,
        schemas,
    })
}
