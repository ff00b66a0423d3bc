//! Markdown rendering
//!
//! [`Renderer`] carries the read-only inputs of one conversion (schema graph, shared-schema
//! usage, example catalog, depth ceiling) and collects warnings about undocumented fields and
//! endpoints while it writes.

mod document;
mod fields;
mod params;


pub use document::{group_by_tags, TagGroups, DEFAULT_TAG};
pub use fields::{write_field_bullets, write_schema_definition};
pub use params::render_parameters;

use crate::example::ExampleCatalog;
use crate::spec::SchemaGraph;
use crate::usage::SharedSchemas;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static ANCHOR_STRIP: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[^a-z0-9]+").expect("anchor pattern is valid")
});

/// Anchor for an endpoint heading: `GET /pets/{id}` becomes `getpetsid`
pub fn make_anchor(method: &str, path: &str) -> String {
    let lowered = format!("{method} {path}").to_lowercase();
    ANCHOR_STRIP.replace_all(&lowered, "").into_owned()
}

/// Anchor for a shared schema heading: `User_Profile` becomes `user-profile`
pub fn make_schema_anchor(name: &str) -> String {
    let lowered = name.to_lowercase();
    ANCHOR_STRIP
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Writes Markdown for one document
pub struct Renderer<'a> {
    graph: &'a SchemaGraph,
    shared: &'a SharedSchemas,
    catalog: &'a ExampleCatalog,
    max_depth: usize,
    warnings: Vec<String>,
}

impl<'a> Renderer<'a> {
    /// # Arguments
    ///
    /// * `graph` - Named component schemas
    /// * `shared` - Schemas to render as references plus one shared section (empty to inline all)
    /// * `catalog` - Pre-generated example payloads
    /// * `max_depth` - Ceiling on nested named-schema expansion
    pub fn new(
        graph: &'a SchemaGraph,
        shared: &'a SharedSchemas,
        catalog: &'a ExampleCatalog,
        max_depth: usize,
    ) -> Self {
        Self {
            graph,
            shared,
            catalog,
            max_depth,
            warnings: Vec::new(),
        }
    }

    /// Warnings collected so far
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}
