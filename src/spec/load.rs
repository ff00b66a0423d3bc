use super::build::build_document;
use super::types::ApiDocument;
use crate::error::{ConvertError, Result};
use anyhow::Context;
use oas3::OpenApiV3Spec;
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::Path;
use tracing::{debug, info, warn};

/// Drop path-item keys oas3 does not model so that vendor-specific verbs don't fail validation
fn strip_unknown_verbs(val: &mut serde_json::Value) {
    const METHODS: [&str; 8] = ["get", "post", "put", "delete", "patch", "options", "head", "trace"];

    let Some(serde_json::Value::Object(paths_map)) = val.get_mut("paths") else {
        return;
    };
    for item in paths_map.values_mut() {
        if let serde_json::Value::Object(obj) = item {
            obj.retain(|k, _| {
                let lk = k.to_ascii_lowercase();
                match lk.as_str() {
                    "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                    m if METHODS.contains(&m) => true,
                    _ => k.starts_with("x-"),
                }
            });
        }
    }
}

/// Parse document bytes (YAML or JSON) into a root mapping
///
/// # Errors
///
/// Returns [`ConvertError::Parse`] when the bytes are not YAML/JSON or the root is not an object.
pub fn parse_document(bytes: &[u8]) -> Result<Mapping> {
    let value: YamlValue =
        serde_yaml::from_slice(bytes).map_err(|e| ConvertError::Parse(e.to_string()))?;
    match value {
        YamlValue::Mapping(map) => Ok(map),
        other => Err(ConvertError::Parse(format!(
            "document root must be an object, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

/// Determine the declared OpenAPI version and reject anything but 3.x
///
/// # Errors
///
/// [`ConvertError::MissingVersion`] when neither `openapi` nor `swagger` is declared,
/// [`ConvertError::UnsupportedVersion`] for any other major version.
pub fn detect_version(root: &Mapping) -> Result<String> {
    let declared = root
        .get("openapi")
        .or_else(|| root.get("swagger"))
        .and_then(|v| match v {
            YamlValue::String(s) => Some(s.clone()),
            YamlValue::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|v| !v.is_empty())
        .ok_or(ConvertError::MissingVersion)?;

    if !declared.starts_with("3.") {
        return Err(ConvertError::UnsupportedVersion(declared));
    }
    Ok(declared)
}

/// Check the document against the typed oas3 model
///
/// oas3 models OpenAPI 3.1 only, so 3.0 documents are not checked. A mismatch is reported but
/// never rejects the document; [`build_document`] decides what can be converted.
fn check_typed_model(bytes: &[u8], version: &str) {
    if !version.starts_with("3.1") {
        debug!(openapi = %version, "skipping typed model check for pre-3.1 document");
        return;
    }
    match typed_model(bytes) {
        Ok(spec) => debug!(
            title = %spec.info.title,
            paths = spec.paths.as_ref().map(|p| p.len()).unwrap_or(0),
            "document matches the OpenAPI 3.1 model"
        ),
        Err(err) => warn!(error = %err, "document does not match the OpenAPI 3.1 model, continuing"),
    }
}

fn typed_model(bytes: &[u8]) -> std::result::Result<OpenApiV3Spec, String> {
    let mut value: serde_json::Value = serde_yaml::from_slice(bytes).map_err(|e| e.to_string())?;
    strip_unknown_verbs(&mut value);
    serde_json::from_value(value).map_err(|e| e.to_string())
}

/// Load an OpenAPI 3.x document from raw bytes
///
/// Validation happens in a fixed order: parse, version detection, then construction of the
/// ordered schema graph and endpoint list, which rejects unresolvable references.
pub fn load_document(bytes: &[u8]) -> Result<ApiDocument> {
    let root = parse_document(bytes)?;
    let version = detect_version(&root)?;
    check_typed_model(bytes, &version);
    build_document(&root, &version)
}

/// Load an OpenAPI 3.x document from a file on disk
pub fn load_document_from_path(path: &Path) -> anyhow::Result<ApiDocument> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read OpenAPI document: {}", path.display()))?;
    let document = load_document(&bytes)
        .with_context(|| format!("Failed to load OpenAPI document: {}", path.display()))?;
    info!(
        path = %path.display(),
        openapi = %document.openapi,
        endpoints = document.endpoints.len(),
        schemas = document.schemas.len(),
        "loaded OpenAPI document"
    );
    Ok(document)
}
