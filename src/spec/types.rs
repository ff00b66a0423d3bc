use crate::error::{ConvertError, Result};
use http::Method;
use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;

/// Prefix every resolvable schema reference carries
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// The only media type whose bodies are documented field by field
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Coarse shape of a schema node, as the extractor and generator see it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Object,
    Array,
    Scalar,
    Union,
    Composite,
}

/// A pointer into the schema graph
///
/// Named references are the only way a node can be shared or self-referential; inline
/// nodes are owned by their parent and form a finite tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaRef {
    Named(String),
    Inline(Box<SchemaNode>),
}

impl SchemaRef {
    /// The component name for a named reference
    pub fn name(&self) -> Option<&str> {
        match self {
            SchemaRef::Named(name) => Some(name),
            SchemaRef::Inline(_) => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, SchemaRef::Named(_))
    }
}

/// One declared property of an object schema
///
/// `schema` is `None` when the property value could not be read as a schema (e.g. a bare
/// boolean schema); such properties are skipped during extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub schema: Option<SchemaRef>,
}

/// A schema body with the attributes the converter consumes
///
/// Properties keep the declaration order of the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub schema_type: Option<String>,
    pub format: Option<String>,
    pub description: Option<String>,
    pub properties: Vec<Property>,
    pub required: Vec<String>,
    pub enum_values: Vec<YamlValue>,
    pub items: Option<Box<SchemaRef>>,
    pub all_of: Vec<SchemaRef>,
    pub one_of: Vec<SchemaRef>,
    pub discriminator: Option<String>,
    pub default: Option<YamlValue>,
    pub example: Option<YamlValue>,
    pub examples: Vec<YamlValue>,
}

impl SchemaNode {
    /// Declared type, or `object` when the node has properties or `allOf` members but no type
    pub fn declared_type(&self) -> Option<&str> {
        match self.schema_type.as_deref() {
            Some(ty) => Some(ty),
            None if !self.properties.is_empty() || !self.all_of.is_empty() => Some("object"),
            None => None,
        }
    }

    pub fn kind(&self) -> SchemaKind {
        if !self.one_of.is_empty() {
            return SchemaKind::Union;
        }
        if !self.all_of.is_empty() {
            return SchemaKind::Composite;
        }
        match self.declared_type() {
            Some("object") => SchemaKind::Object,
            Some("array") => SchemaKind::Array,
            _ => SchemaKind::Scalar,
        }
    }
}

/// Render an enum literal (or any scalar) the way it appears in documentation
///
/// Strings are shown raw, other scalars by their canonical text, `null` as `null`.
pub fn literal_text(value: &YamlValue) -> String {
    match value {
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::String(s) => s.clone(),
        YamlValue::Tagged(tagged) => literal_text(&tagged.value),
        other => serde_json::to_string(other)
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// Named component schemas, keyed by component name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaGraph {
    schemas: BTreeMap<String, SchemaNode>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, node: SchemaNode) {
        self.schemas.insert(name.into(), node);
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.get(name)
    }

    /// Component names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Resolve a pointer to its body
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Structural`] when a named reference has no body.
    pub fn resolve<'a>(&'a self, schema: &'a SchemaRef) -> Result<&'a SchemaNode> {
        match schema {
            SchemaRef::Inline(node) => Ok(node),
            SchemaRef::Named(name) => self.get(name).ok_or_else(|| {
                ConvertError::structural(
                    format!("{SCHEMA_REF_PREFIX}{name}"),
                    "referenced schema has no definition",
                )
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// The `in` value as written in OpenAPI documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "Path"),
            ParameterLocation::Query => write!(f, "Query"),
            ParameterLocation::Header => write!(f, "Header"),
            ParameterLocation::Cookie => write!(f, "Cookie"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMeta {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<String>,
    pub schema: Option<SchemaRef>,
}

/// One media-type entry of a request body or response
#[derive(Debug, Clone, PartialEq)]
pub struct MediaTypeMeta {
    pub content_type: String,
    pub schema: Option<SchemaRef>,
    pub example: Option<YamlValue>,
    /// `value`s of the named examples, in declaration order
    pub examples: Vec<YamlValue>,
}

fn json_media(content: &[MediaTypeMeta]) -> Option<&MediaTypeMeta> {
    content
        .iter()
        .find(|media| media.content_type == JSON_CONTENT_TYPE)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyMeta {
    pub description: Option<String>,
    pub content: Vec<MediaTypeMeta>,
}

impl RequestBodyMeta {
    pub fn json(&self) -> Option<&MediaTypeMeta> {
        json_media(&self.content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    /// Status code as written in the document (`200`, `4XX`, `default`)
    pub status: String,
    pub description: Option<String>,
    pub content: Vec<MediaTypeMeta>,
}

impl ResponseMeta {
    pub fn json(&self) -> Option<&MediaTypeMeta> {
        json_media(&self.content)
    }

    pub fn is_success(&self) -> bool {
        self.status.starts_with('2')
    }
}

/// An operation (method + path) with everything the renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterMeta>,
    pub request_body: Option<RequestBodyMeta>,
    pub responses: Vec<ResponseMeta>,
}

impl Endpoint {
    /// `"METHOD PATH"`, the key used by usage analysis
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// A loaded OpenAPI 3.x document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiDocument {
    pub openapi: String,
    pub title: String,
    pub description: Option<String>,
    /// Number of entries under `paths`
    pub path_count: usize,
    pub endpoints: Vec<Endpoint>,
    pub schemas: SchemaGraph,
}
