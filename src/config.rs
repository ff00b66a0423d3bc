//! Documentation settings file
//!
//! An optional `oasdoc.toml` next to the OpenAPI document (or passed explicitly) supplies
//! defaults for a conversion:
//!
//! ```toml
//! title = "Pet Store API"
//! description = "Public endpoints"
//! shared_schemas = true
//! max_depth = 8
//! example_depth = 4
//! ```
//!
//! Precedence: command-line flags, then this file, then environment ([`RuntimeConfig`]),
//! then built-in defaults.

use crate::convert::ConvertOptions;
use crate::runtime_config::{is_usable_depth, RuntimeConfig, DEPTH_LIMIT};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the OpenAPI document
pub const CONFIG_FILE_NAME: &str = "oasdoc.toml";

/// Settings loaded from `oasdoc.toml`; every key is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Document heading (defaults to the document's `info.title`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Paragraph under the heading (defaults to `info.description`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Render schemas used by several endpoints in a shared section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_schemas: Option<bool>,
    /// Field-definition expansion ceiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Example generation depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_depth: Option<usize>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub shared_schemas: bool,
    pub debug: bool,
}

/// What the document itself offers as heading and description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDefaults {
    pub title: String,
    pub description: String,
}

fn usable(depth: Option<usize>) -> Option<usize> {
    depth.filter(|d| is_usable_depth(*d))
}

impl DocsConfig {
    /// Reject depth settings outside `1..=DEPTH_LIMIT`
    pub fn validate(&self) -> anyhow::Result<()> {
        for (key, value) in [("max_depth", self.max_depth), ("example_depth", self.example_depth)] {
            if let Some(depth) = value {
                if !is_usable_depth(depth) {
                    anyhow::bail!("{key} must be between 1 and {DEPTH_LIMIT}, got {depth}");
                }
            }
        }
        Ok(())
    }

    /// Combine CLI flags, this file, environment and document defaults into conversion options
    pub fn to_options(
        &self,
        cli: &CliOverrides,
        runtime: &RuntimeConfig,
        document: &DocumentDefaults,
    ) -> ConvertOptions {
        ConvertOptions {
            title: cli
                .title
                .clone()
                .or_else(|| self.title.clone())
                .unwrap_or_else(|| document.title.clone()),
            description: cli
                .description
                .clone()
                .or_else(|| self.description.clone())
                .unwrap_or_else(|| document.description.clone()),
            enable_shared_schemas: cli.shared_schemas || self.shared_schemas.unwrap_or(false),
            debug: cli.debug,
            max_depth: usable(self.max_depth).unwrap_or(runtime.max_depth),
            example_depth: usable(self.example_depth).unwrap_or(runtime.example_depth),
        }
    }
}

/// Load documentation settings from a TOML file
///
/// # Arguments
///
/// * `config_path` - Path to the `oasdoc.toml` file
///
/// # Returns
///
/// Returns `Ok(Some(config))` if file exists and parses successfully,
/// `Ok(None)` if file doesn't exist (not an error),
/// `Err` if file exists but fails to parse or holds an out-of-range depth.
pub fn load_docs_config(config_path: &Path) -> anyhow::Result<Option<DocsConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read docs config: {}", config_path.display()))?;

    let config: DocsConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse docs config: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid docs config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Auto-detect `oasdoc.toml` alongside the OpenAPI document
pub fn auto_detect_config_path(spec_path: &Path) -> Option<PathBuf> {
    let config_path = spec_path.parent()?.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Resolve the settings file path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the document
/// 3. None (no config)
///
/// # Errors
///
/// An explicit path that does not exist is an error rather than silently ignored.
pub fn resolve_config_path(explicit_path: Option<&Path>, spec_path: &Path) -> anyhow::Result<Option<PathBuf>> {
    match explicit_path {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => anyhow::bail!("Docs config not found: {}", path.display()),
        None => Ok(auto_detect_config_path(spec_path)),
    }
}
