//! Error types for document conversion
//!
//! Conversion failures are split in two families:
//!
//! - [`ConvertError`] aborts the whole conversion (bad input, unsupported document version,
//!   an untraversable schema graph, or an inline body where a schema name is mandatory).
//! - [`ExampleError`] only aborts a single example resolution; callers log it and continue
//!   without an example.
//!
//! Recursion and depth limits are not errors. The extractor truncates silently and the
//! renderer shows a terminal reference instead.

use thiserror::Error;

/// Errors that abort a conversion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// No document bytes were supplied
    #[error("openapi input cannot be empty")]
    EmptyInput,

    /// The document title option was empty
    #[error("title cannot be empty")]
    EmptyTitle,

    /// The input is not valid YAML/JSON or its root is not a mapping
    #[error("failed to parse openapi document: {0}")]
    Parse(String),

    /// Neither `openapi` nor `swagger` is declared
    #[error("failed to determine openapi version")]
    MissingVersion,

    /// The document declares a version other than 3.x
    #[error("only openapi 3.x is supported, got version: {0}")]
    UnsupportedVersion(String),

    /// The document could not be turned into the schema graph / endpoint model
    #[error("failed to build openapi 3.x model: {0}")]
    ModelBuild(String),

    /// The schema graph cannot be traversed (a referenced body is missing)
    #[error("structural error at {location}: {message}")]
    Structural {
        /// Where traversal failed (schema name or reference)
        location: String,
        /// What was expected
        message: String,
    },

    /// An inline schema was supplied where a named schema is required for example lookup
    #[error("inline schema not supported in {context}, use $ref")]
    UnsupportedSchema {
        /// The consumption site, e.g. `POST /users request body`
        context: String,
    },
}

impl ConvertError {
    /// Shorthand for a [`ConvertError::Structural`] failure
    pub fn structural(location: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::Structural {
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while decoding or generating a single example payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExampleError {
    /// The example node has a shape that has no JSON equivalent
    #[error("malformed example at {path}: {reason}")]
    Malformed {
        /// Location inside the example value (`$`, `$.items[0]`, ...)
        path: String,
        /// Why the node was rejected
        reason: String,
    },

    /// The generator was asked for a schema name the graph does not contain
    #[error("no schema named '{0}'")]
    UnknownSchema(String),

    /// The generator could not produce a value within its depth budget
    #[error("example for '{name}' exceeds the maximum depth of {depth}")]
    DepthExceeded {
        /// Schema name
        name: String,
        /// Configured depth limit
        depth: usize,
    },
}

/// Result alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
