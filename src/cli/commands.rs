use crate::config::{load_docs_config, resolve_config_path, CliOverrides, DocsConfig, DocumentDefaults};
use crate::convert::{convert_document, ConvertResult};
use crate::logging::{init_logging_with_config, LogConfig};
use crate::runtime_config::RuntimeConfig;
use crate::spec::load_document_from_path;
use crate::usage::identify_shared_schemas;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line interface for oasdoc
///
/// Renders OpenAPI 3.x documents as Markdown API documentation.
#[derive(Parser)]
#[command(name = "oasdoc")]
#[command(version, about = "OpenAPI 3.x to Markdown documentation", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Render an OpenAPI document as Markdown
    Convert {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document heading (default: info.title)
        #[arg(long)]
        title: Option<String>,

        /// Paragraph under the heading (default: info.description)
        #[arg(long)]
        description: Option<String>,

        /// Render schemas used by several endpoints once, in a shared section
        #[arg(long, default_value_t = false)]
        shared_schemas: bool,

        /// Verbose logging and conversion counters on stderr
        #[arg(long, default_value_t = false)]
        debug: bool,

        /// Path to oasdoc.toml
        /// If not provided, will auto-detect alongside the OpenAPI document
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List schemas used as request/response bodies by more than one endpoint
    Shared {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
}

impl Commands {
    pub(crate) fn debug(&self) -> bool {
        matches!(self, Commands::Convert { debug: true, .. })
    }
}

/// Parse arguments, set up logging, and run the selected command
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = if cli.command.debug() {
        LogConfig::verbose()
    } else {
        LogConfig::from_env()
    };
    if let Err(err) = init_logging_with_config(&log_config) {
        eprintln!("Warning: {err:#}");
    }
    run(cli)
}

/// Run a parsed command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert {
            spec,
            output,
            title,
            description,
            shared_schemas,
            debug,
            config,
        } => {
            let overrides = CliOverrides {
                title,
                description,
                shared_schemas,
                debug,
            };
            let result = convert_file(&spec, config.as_deref(), &overrides)?;

            match &output {
                Some(path) => {
                    std::fs::write(path, &result.markdown)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!(
                        "Wrote {} ({} endpoints, {} tags)",
                        path.display(),
                        result.endpoint_count,
                        result.tag_count
                    );
                }
                None => print!("{}", result.markdown),
            }

            for warning in &result.warnings {
                eprintln!("warning: {warning}");
            }
            if let Some(info) = &result.debug {
                eprintln!("{info:#?}");
            }
            Ok(())
        }
        Commands::Shared { spec } => {
            let document = load_document_from_path(&spec)?;
            let shared = identify_shared_schemas(&document.endpoints);
            if shared.is_empty() {
                println!("No shared schemas");
            }
            for (name, usage) in &shared {
                println!("{name}: {}", usage.endpoints.join(", "));
            }
            Ok(())
        }
    }
}

/// Load a document and its settings, then convert it
pub fn convert_file(
    spec: &Path,
    config: Option<&Path>,
    overrides: &CliOverrides,
) -> anyhow::Result<ConvertResult> {
    let docs_config = match resolve_config_path(config, spec)? {
        Some(path) => {
            info!(config = %path.display(), "using docs config");
            load_docs_config(&path)?.unwrap_or_default()
        }
        None => DocsConfig::default(),
    };

    let document = load_document_from_path(spec)?;
    let defaults = DocumentDefaults {
        title: document.title.clone(),
        description: document.description.clone().unwrap_or_default(),
    };
    let options = docs_config.to_options(overrides, &RuntimeConfig::from_env(), &defaults);
    convert_document(&document, &options, &options.example_generator())
        .with_context(|| format!("Failed to convert {}", spec.display()))
}
