//! Unit tests for CLI commands

use crate::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_convert_command_minimal() {
    let cli = Cli::try_parse_from(["oasdoc", "convert", "--spec", "api.yaml"]).unwrap();

    match cli.command {
        Commands::Convert {
            spec,
            output,
            title,
            shared_schemas,
            debug,
            config,
            ..
        } => {
            assert_eq!(spec.to_string_lossy(), "api.yaml");
            assert!(output.is_none());
            assert!(title.is_none());
            assert!(!shared_schemas);
            assert!(!debug);
            assert!(config.is_none());
        }
        _ => panic!("Expected Convert command"),
    }
}

#[test]
fn test_convert_command_with_flags() {
    let cli = Cli::try_parse_from([
        "oasdoc",
        "convert",
        "-s",
        "api.yaml",
        "-o",
        "API.md",
        "--title",
        "Pets",
        "--description",
        "All the pets",
        "--shared-schemas",
        "--debug",
        "--config",
        "docs.toml",
    ])
    .unwrap();

    assert!(cli.command.debug());
    match cli.command {
        Commands::Convert {
            output,
            title,
            description,
            shared_schemas,
            config,
            ..
        } => {
            assert_eq!(output.unwrap().to_string_lossy(), "API.md");
            assert_eq!(title.as_deref(), Some("Pets"));
            assert_eq!(description.as_deref(), Some("All the pets"));
            assert!(shared_schemas);
            assert_eq!(config.unwrap().to_string_lossy(), "docs.toml");
        }
        _ => panic!("Expected Convert command"),
    }
}

#[test]
fn test_shared_command() {
    let cli = Cli::try_parse_from(["oasdoc", "shared", "--spec", "api.yaml"]).unwrap();
    assert!(!cli.command.debug());
    match cli.command {
        Commands::Shared { spec } => assert_eq!(spec.to_string_lossy(), "api.yaml"),
        _ => panic!("Expected Shared command"),
    }
}

#[test]
fn test_spec_is_required() {
    assert!(Cli::try_parse_from(["oasdoc", "convert"]).is_err());
    assert!(Cli::try_parse_from(["oasdoc", "shared"]).is_err());
}
