//! Schema usage analysis
//!
//! Finds named schemas that are consumed as JSON bodies by more than one endpoint (rendered
//! once in a shared section) and, per endpoint, named schemas reused across several success
//! responses (rendered once with an "applies to" note).

use crate::spec::{Endpoint, MediaTypeMeta};
use std::collections::{BTreeMap, BTreeSet};

/// A schema used as a body by two or more endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaUsage {
    pub schema_name: String,
    /// `"METHOD PATH"` keys, sorted
    pub endpoints: Vec<String>,
}

/// Shared schemas keyed (and iterated) by schema name
pub type SharedSchemas = BTreeMap<String, SchemaUsage>;

fn named_body_schema(media: Option<&MediaTypeMeta>) -> Option<&str> {
    media?.schema.as_ref()?.name()
}

/// Collect the names of all JSON request/response body schemas of one endpoint
fn body_schema_names(endpoint: &Endpoint) -> impl Iterator<Item = &str> {
    let request = endpoint
        .request_body
        .as_ref()
        .and_then(|body| named_body_schema(body.json()));
    let responses = endpoint
        .responses
        .iter()
        .filter_map(|response| named_body_schema(response.json()));
    request.into_iter().chain(responses)
}

/// Identify schemas used by two or more distinct endpoints
///
/// Only named references under `application/json` request bodies and responses count;
/// parameters, other media types and inline schemas are ignored. A schema used by one
/// endpoint in several places is not shared.
pub fn identify_shared_schemas(endpoints: &[Endpoint]) -> SharedSchemas {
    let mut schema_to_endpoints: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();

    for endpoint in endpoints {
        let key = endpoint.key();
        for name in body_schema_names(endpoint) {
            schema_to_endpoints
                .entry(name)
                .or_default()
                .insert(key.clone());
        }
    }

    schema_to_endpoints
        .into_iter()
        .filter(|(_, users)| users.len() >= 2)
        .map(|(name, users)| {
            (
                name.to_string(),
                SchemaUsage {
                    schema_name: name.to_string(),
                    endpoints: users.into_iter().collect(),
                },
            )
        })
        .collect()
}

/// Identify named schemas one endpoint returns from two or more 2xx responses
///
/// Returns schema name to status codes, codes in document order.
pub fn identify_shared_response_schemas(endpoint: &Endpoint) -> BTreeMap<String, Vec<String>> {
    let mut schema_to_codes: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for response in endpoint.responses.iter().filter(|r| r.is_success()) {
        if let Some(name) = named_body_schema(response.json()) {
            schema_to_codes
                .entry(name.to_string())
                .or_default()
                .push(response.status.clone());
        }
    }

    schema_to_codes.retain(|_, codes| codes.len() >= 2);
    schema_to_codes
}
