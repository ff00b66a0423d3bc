//! Document conversion entry points
//!
//! [`convert`] validates raw input and runs the whole pipeline: load the document, generate the
//! example catalog, analyze schema usage, then render. [`convert_document`] starts from an
//! already loaded document and a caller-chosen [`ExampleGenerator`].

use crate::error::{ConvertError, Result};
use crate::example::{ExampleCatalog, ExampleGenerator, SchemaExampleGenerator, DEFAULT_EXAMPLE_DEPTH};
use crate::extract::DEFAULT_MAX_DEPTH;
use crate::render::{group_by_tags, Renderer, TagGroups};
use crate::runtime_config::DEPTH_LIMIT;
use crate::spec::{load_document, ApiDocument};
use crate::usage::{identify_shared_schemas, SharedSchemas};
use std::collections::BTreeMap;
use tracing::info;

/// Options for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Top-level heading; must not be empty
    pub title: String,
    /// Paragraph under the heading; skipped when empty
    pub description: String,
    /// Render schemas used by several endpoints once, in a shared section
    pub enable_shared_schemas: bool,
    /// Attach [`DebugInfo`] to the result
    pub debug: bool,
    /// Ceiling on nested named-schema expansion in field definitions
    pub max_depth: usize,
    /// Nesting budget for generated example payloads
    pub example_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            enable_shared_schemas: false,
            debug: false,
            max_depth: DEFAULT_MAX_DEPTH,
            example_depth: DEFAULT_EXAMPLE_DEPTH,
        }
    }
}

impl ConvertOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_shared_schemas(mut self, enabled: bool) -> Self {
        self.enable_shared_schemas = enabled;
        self
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Example generator for these options; the depth is capped at [`DEPTH_LIMIT`]
    pub fn example_generator(&self) -> SchemaExampleGenerator {
        SchemaExampleGenerator::new(self.example_depth.min(DEPTH_LIMIT))
    }
}

/// Markdown output and generation metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertResult {
    pub markdown: String,
    pub endpoint_count: usize,
    pub tag_count: usize,
    pub warnings: Vec<String>,
    pub debug: Option<DebugInfo>,
}

/// Counters describing what the converter saw, for tests and troubleshooting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugInfo {
    pub parsed_paths: usize,
    pub extracted_ops: usize,
    /// Tag group names, sorted (includes the default group when untagged endpoints exist)
    pub tags_found: Vec<String>,
    pub untagged_ops: usize,
    /// Parameter count per location (`path`, `query`, `header`, `cookie`)
    pub parameter_counts: BTreeMap<String, usize>,
    /// Response count per status code
    pub response_counts: BTreeMap<String, usize>,
    pub request_body_count: usize,
    /// Schemas used by two or more endpoints, whether or not shared rendering is enabled
    pub shared_schema_count: usize,
}

/// Convert an OpenAPI 3.x document (YAML or JSON) to Markdown
///
/// # Errors
///
/// Input validation failures in this order: empty input, empty title, unparsable document,
/// missing version, non-3.x version, model build failure. Rendering can then fail with
/// [`ConvertError::Structural`] or [`ConvertError::UnsupportedSchema`].
pub fn convert(openapi: &[u8], opts: &ConvertOptions) -> Result<ConvertResult> {
    if openapi.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    if opts.title.is_empty() {
        return Err(ConvertError::EmptyTitle);
    }

    let document = load_document(openapi)?;
    convert_document(&document, opts, &opts.example_generator())
}

/// Convert a loaded document using `generator` for schema-derived examples
pub fn convert_document<G: ExampleGenerator + ?Sized>(
    document: &ApiDocument,
    opts: &ConvertOptions,
    generator: &G,
) -> Result<ConvertResult> {
    if opts.title.is_empty() {
        return Err(ConvertError::EmptyTitle);
    }

    let catalog = ExampleCatalog::build(&document.schemas, generator);
    let shared = identify_shared_schemas(&document.endpoints);
    let rendered_shared = if opts.enable_shared_schemas {
        shared.clone()
    } else {
        SharedSchemas::new()
    };
    let tag_groups = group_by_tags(&document.endpoints);

    let mut renderer = Renderer::new(&document.schemas, &rendered_shared, &catalog, opts.max_depth);
    let markdown = renderer.render_document(document, &opts.title, &opts.description, &tag_groups)?;
    let warnings = renderer.into_warnings();

    info!(
        endpoints = document.endpoints.len(),
        tags = tag_groups.len(),
        shared_schemas = rendered_shared.len(),
        warnings = warnings.len(),
        bytes = markdown.len(),
        "converted OpenAPI document to markdown"
    );

    Ok(ConvertResult {
        markdown,
        endpoint_count: document.endpoints.len(),
        tag_count: tag_groups.len(),
        warnings,
        debug: opts
            .debug
            .then(|| collect_debug_info(document, &tag_groups, &shared)),
    })
}

fn collect_debug_info(
    document: &ApiDocument,
    tag_groups: &TagGroups<'_>,
    shared: &SharedSchemas,
) -> DebugInfo {
    let mut tags_found: Vec<String> = tag_groups.iter().map(|(tag, _)| tag.clone()).collect();
    tags_found.sort();

    let mut debug = DebugInfo {
        parsed_paths: document.path_count,
        extracted_ops: document.endpoints.len(),
        tags_found,
        shared_schema_count: shared.len(),
        ..DebugInfo::default()
    };

    for endpoint in &document.endpoints {
        if endpoint.tags.is_empty() {
            debug.untagged_ops += 1;
        }
        if endpoint.request_body.is_some() {
            debug.request_body_count += 1;
        }
        for param in &endpoint.parameters {
            *debug
                .parameter_counts
                .entry(param.location.as_str().to_string())
                .or_insert(0) += 1;
        }
        for response in &endpoint.responses {
            *debug
                .response_counts
                .entry(response.status.clone())
                .or_insert(0) += 1;
        }
    }

    debug
}
