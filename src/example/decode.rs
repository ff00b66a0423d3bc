use crate::error::ExampleError;
use crate::spec::key_text;
use serde_json::{Map, Number, Value as JsonValue};
use serde_yaml::Value as YamlValue;

/// Decode a raw example node into a JSON value
///
/// Mapping keys that are numbers or booleans are stringified, so a YAML example like
/// `{200: ok}` becomes `{"200": "ok"}`.
///
/// # Errors
///
/// Returns [`ExampleError::Malformed`] for nodes with no JSON equivalent: tagged values,
/// non-finite numbers, and null or non-scalar mapping keys.
pub fn decode_example(value: &YamlValue) -> Result<JsonValue, ExampleError> {
    decode_at(value, "$")
}

fn malformed(path: &str, reason: impl Into<String>) -> ExampleError {
    ExampleError::Malformed {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn decode_at(value: &YamlValue, path: &str) -> Result<JsonValue, ExampleError> {
    match value {
        YamlValue::Null => Ok(JsonValue::Null),
        YamlValue::Bool(b) => Ok(JsonValue::Bool(*b)),
        YamlValue::Number(n) => decode_number(n, path),
        YamlValue::String(s) => Ok(JsonValue::String(s.clone())),
        YamlValue::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_at(item, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array),
        YamlValue::Mapping(entries) => {
            let mut object = Map::with_capacity(entries.len());
            for (key, item) in entries {
                let key = key_text(key).ok_or_else(|| {
                    malformed(path, "mapping keys must be strings, numbers or booleans")
                })?;
                let decoded = decode_at(item, &format!("{path}.{key}"))?;
                object.insert(key, decoded);
            }
            Ok(JsonValue::Object(object))
        }
        YamlValue::Tagged(tagged) => Err(malformed(
            path,
            format!("tagged value {} has no JSON equivalent", tagged.tag),
        )),
    }
}

fn decode_number(n: &serde_yaml::Number, path: &str) -> Result<JsonValue, ExampleError> {
    if let Some(i) = n.as_i64() {
        return Ok(JsonValue::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(JsonValue::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(JsonValue::Number)
        .ok_or_else(|| malformed(path, format!("number {n} is not finite")))
}
