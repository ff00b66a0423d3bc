//! # CLI Module
//!
//! Command-line front end for the converter.
//!
//! ## Commands
//!
//! ### `convert`
//!
//! Render an OpenAPI 3.x document as Markdown:
//!
//! ```bash
//! oasdoc convert --spec openapi.yaml --output API.md
//! ```
//!
//! Options:
//! - `--spec <FILE>` - Path to the OpenAPI document (required)
//! - `--output <FILE>` - Write Markdown here instead of stdout
//! - `--title <TEXT>` - Heading (default: `info.title`)
//! - `--description <TEXT>` - Paragraph under the heading (default: `info.description`)
//! - `--shared-schemas` - Render schemas used by several endpoints once, at the bottom
//! - `--debug` - Verbose logging and conversion counters on stderr
//! - `--config <FILE>` - Settings file (default: `oasdoc.toml` next to the document)
//!
//! ### `shared`
//!
//! List schemas used as bodies by more than one endpoint:
//!
//! ```bash
//! oasdoc shared --spec openapi.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use oasdoc::cli::{run, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run(cli)?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{convert_file, run, run_cli, Cli, Commands};
