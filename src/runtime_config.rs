//! # Runtime Configuration Module
//!
//! Environment variable-based defaults for conversion limits. Values set here are overridden
//! by a `oasdoc.toml` file and by command-line flags.
//!
//! ## Environment Variables
//!
//! ### `OASDOC_MAX_DEPTH`
//!
//! Ceiling on nested named-schema expansion in field definitions. Chains deeper than this
//! stop producing nested sections.
//!
//! Default: `10`
//!
//! ### `OASDOC_EXAMPLE_DEPTH`
//!
//! Nesting budget for generated example payloads. Deeper properties are omitted.
//!
//! Default: `5`
//!
//! Both values must lie in `1..=64`; anything else falls back to the default.
//!
//! ## Usage
//!
//! ```rust
//! use oasdoc::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Max depth: {}", config.max_depth);
//! ```

use crate::example::DEFAULT_EXAMPLE_DEPTH;
use crate::extract::DEFAULT_MAX_DEPTH;
use std::env;

/// Largest accepted value for either depth setting
pub const DEPTH_LIMIT: usize = 64;

/// Whether a configured depth is usable: at least 1 and at most [`DEPTH_LIMIT`]
pub fn is_usable_depth(depth: usize) -> bool {
    (1..=DEPTH_LIMIT).contains(&depth)
}

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Field-definition expansion ceiling (default: 10)
    pub max_depth: usize,
    /// Example generation depth (default: 5)
    pub example_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            example_depth: DEFAULT_EXAMPLE_DEPTH,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup; unparsable or out-of-range values fall back
    /// to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str, default: usize| -> usize {
            lookup(key)
                .and_then(|val| val.trim().parse().ok())
                .filter(|depth: &usize| is_usable_depth(*depth))
                .unwrap_or(default)
        };
        RuntimeConfig {
            max_depth: read("OASDOC_MAX_DEPTH", defaults.max_depth),
            example_depth: read("OASDOC_EXAMPLE_DEPTH", defaults.example_depth),
        }
    }
}
