//! Reports command - Manage saved stability reports
//!
//! Provides the `stabilog reports` CLI command with subcommands:
//! - `list`: Show all saved reports
//! - `view <id>`: Display a saved report in either encoding
//! - `delete`: Remove reports from local storage

use anyhow::{Context, Result};
use clap::Subcommand;
use stabilog_core::config::Config;
use stabilog_report::LocalReportStore;

use crate::output::{format_size, get_formatter, OutputFormat};

/// Saved report subcommands
#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// List all saved reports
    List,
    /// View a saved report
    View {
        /// Report ID or ID prefix
        id: String,
        /// Print the legacy XML encoding instead of the structured record
        #[arg(long)]
        xml: bool,
    },
    /// Delete reports from local storage
    Delete {
        /// Specific report ID to delete
        id: Option<String>,
        /// Delete all reports
        #[arg(long)]
        all: bool,
    },
}

impl ReportsCommand {
    pub fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let store = LocalReportStore::new(config.storage.reports_dir.clone());

        match self {
            ReportsCommand::List => {
                let entries = store.list()?;
                if format.is_json() {
                    let json: Vec<serde_json::Value> = entries
                        .iter()
                        .map(|e| {
                            serde_json::json!({
                                "id": e.id,
                                "kind": e.kind,
                                "date": e.date,
                                "size_bytes": e.size_bytes,
                            })
                        })
                        .collect();
                    formatter.print_json(&serde_json::json!(json));
                    return Ok(());
                }

                if entries.is_empty() {
                    formatter.info("No reports found.");
                    return Ok(());
                }

                println!(
                    "{:<10} {:<12} {:<10} {:>10}",
                    "ID", "Kind", "Date", "Size"
                );
                println!("{}", "-".repeat(45));
                for entry in &entries {
                    println!(
                        "{:<10} {:<12} {:<10} {:>10}",
                        entry.id,
                        entry.kind,
                        entry.date,
                        format_size(entry.size_bytes),
                    );
                }
                println!();
                println!("Total: {} report(s)", entries.len());
            }

            ReportsCommand::View { id, xml } => match store.read(id)? {
                Some(document) => {
                    if *xml {
                        println!("{}", document.legacy_xml);
                    } else if format.is_json() {
                        let value = serde_json::to_value(&document)
                            .context("Failed to serialize report")?;
                        formatter.print_json(&value);
                    } else {
                        println!("ID:          {}", document.id);
                        println!("Kind:        {}", document.kind);
                        println!("Created:     {}", document.created_at.to_rfc3339());
                        println!("Version:     {}", document.app_version);
                        println!("Session:     {}", document.session_id);
                        println!("Events:      {}", document.num_events);
                        for fault in &document.data_quality_faults {
                            formatter.warn(&fault.to_string());
                        }
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&document.structured)
                                .context("Failed to serialize record")?
                        );
                    }
                }
                None => {
                    formatter.error(&format!("Report '{}' not found", id));
                }
            },

            ReportsCommand::Delete { id, all } => {
                if *all {
                    let count = store.delete_all()?;
                    formatter.success(&format!("Deleted {} report(s)", count));
                } else if let Some(report_id) = id {
                    if store.delete(report_id)? {
                        formatter.success(&format!("Deleted report '{}'", report_id));
                    } else {
                        formatter.error(&format!("Report '{}' not found", report_id));
                    }
                } else {
                    formatter.error("Specify a report ID or use --all");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build::BuildCommand;
    use crate::commands::test_support::temp_config;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct BuildArgs {
        #[command(flatten)]
        build: BuildCommand,
    }

    fn save_one(config: &Config) {
        let args = BuildArgs::try_parse_from(["build", "--save"]).unwrap();
        args.build.execute(config, OutputFormat::Json).unwrap();
    }

    #[test]
    fn test_list_and_view_saved_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        save_one(&config);

        ReportsCommand::List
            .execute(&config, OutputFormat::Human)
            .unwrap();

        let store = LocalReportStore::new(config.storage.reports_dir.clone());
        let id = store.list().unwrap()[0].id.clone();
        ReportsCommand::View { id, xml: true }
            .execute(&config, OutputFormat::Human)
            .unwrap();
    }

    #[test]
    fn test_delete_all_empties_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        save_one(&config);
        save_one(&config);

        ReportsCommand::Delete {
            id: None,
            all: true,
        }
        .execute(&config, OutputFormat::Human)
        .unwrap();

        let store = LocalReportStore::new(config.storage.reports_dir.clone());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_view_missing_report_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        ReportsCommand::View {
            id: "deadbeef".into(),
            xml: false,
        }
        .execute(&config, OutputFormat::Human)
        .unwrap();
    }
}
