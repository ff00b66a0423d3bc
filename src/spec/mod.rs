//! OpenAPI 3.x document loading
//!
//! Turns raw YAML/JSON bytes into an [`ApiDocument`]: an ordered list of endpoints and a
//! graph of named component schemas. The graph keeps declaration order, which the rendered
//! field lists depend on.

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
