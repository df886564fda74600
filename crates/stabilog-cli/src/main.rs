//! Stabilog CLI - Build and inspect stability reports
//!
//! Provides commands for:
//! - Building a report from the persisted counters
//! - Inspecting and incrementing counters
//! - Managing saved reports

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use stabilog_core::config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{build::BuildCommand, counters::CountersCommand, reports::ReportsCommand};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "stabilog",
    version,
    about = "Stability and environment report builder"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build one report from the persisted counters and host facts
    Build(BuildCommand),
    /// Inspect and update persisted counters
    #[command(subcommand)]
    Counters(CountersCommand),
    /// Manage saved reports
    #[command(subcommand)]
    Reports(ReportsCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Setup tracing
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!(config = ?cli.config, "Configuration loaded");

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Build(cmd) => cmd.execute(&config, format),
        Commands::Counters(cmd) => cmd.execute(&config, format),
        Commands::Reports(cmd) => cmd.execute(&config, format),
    }
}

/// Loads the explicit config file, or the default one when present.
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_or_default(&Config::default_path()),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        bail!("Invalid configuration: {}", messages.join("; "));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "stabilog",
            "--json",
            "-vv",
            "build",
            "--incremental",
            "--format",
            "legacy",
            "--save",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn test_parse_counter_plugin_requires_event() {
        assert!(Cli::try_parse_from(["stabilog", "counters", "plugin", "Foo"]).is_err());
        assert!(
            Cli::try_parse_from(["stabilog", "counters", "plugin", "Foo", "--crash"]).is_ok()
        );
    }

    #[test]
    fn test_load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "logging:\n  level: loud\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        assert!(load_config(Some(std::path::Path::new("/nonexistent/config.yaml"))).is_err());
    }
}
