//! # oasdoc
//!
//! **oasdoc** renders an [OpenAPI 3.x](https://spec.openapis.org/oas/v3.1.0) document as Markdown
//! API documentation: a table of contents, one section per endpoint with parameters, example
//! payloads and field definitions, and optionally a shared section for schemas several endpoints
//! use.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Document loading: validation, ordered schema graph, endpoint list
//! - **[`usage`]** - Which schemas are shared across endpoints or across responses of one endpoint
//! - **[`extract`]** - Flattening a schema into field descriptors and nested definition sections
//! - **[`example`]** - Example payload resolution and generation
//! - **[`render`]** - Markdown output
//! - **[`convert`]** - The pipeline tying the above together
//! - **[`config`]**, **[`runtime_config`]**, **[`logging`]**, **[`cli`]** - Command-line plumbing
//!
//! ### Conversion Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Convert as convert::convert
//!     participant Spec as spec::load_document
//!     participant Examples as example::ExampleCatalog
//!     participant Usage as usage::identify_shared_schemas
//!     participant Render as render::Renderer
//!
//!     Caller->>Convert: convert(bytes, &options)
//!     Convert->>Spec: parse, check version, build graph
//!     Spec-->>Convert: ApiDocument
//!     Convert->>Examples: generate one payload per component schema
//!     Convert->>Usage: find schemas used by 2+ endpoints
//!     Convert->>Render: render_document(...)
//!     Render-->>Convert: Markdown + warnings
//!     Convert-->>Caller: ConvertResult
//! ```
//!
//! Usage analysis always completes before rendering starts, so every call site already knows
//! whether its schema is rendered inline or as a reference to the shared section.
//!
//! ## Quick Start
//!
//! ```rust
//! use oasdoc::{convert, ConvertOptions};
//!
//! let yaml = br#"
//! openapi: 3.0.0
//! info:
//!   title: Pets
//!   version: 1.0.0
//! paths:
//!   /pets:
//!     get:
//!       summary: List pets
//!       responses:
//!         "200":
//!           description: OK
//! "#;
//!
//! let result = convert(yaml, &ConvertOptions::new("Pet API")).unwrap();
//! assert!(result.markdown.starts_with("# Pet API\n\n"));
//! assert_eq!(result.endpoint_count, 1);
//! ```
//!
//! ## Recursion and Depth
//!
//! A self-referencing schema expands exactly one nested level. Reference chains stop producing
//! nested sections once the configured depth (default 10) is reached. Neither is an error.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod example;
pub mod extract;
pub mod logging;
pub mod render;
pub mod runtime_config;
pub mod spec;
pub mod usage;

pub use convert::{convert, convert_document, ConvertOptions, ConvertResult, DebugInfo};
pub use error::{ConvertError, ExampleError};
pub use spec::{load_document, load_document_from_path, ApiDocument};
