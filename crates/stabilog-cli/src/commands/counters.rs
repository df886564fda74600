//! Counters command - Inspect and update persisted stability counters
//!
//! Provides the `stabilog counters` CLI command with subcommands:
//! - `show`: Print every integer preference and the plugin usage list
//! - `increment <name>`: Add to a named counter
//! - `plugin <name>`: Record a launch, instance or crash for a plugin

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{ArgGroup, Subcommand};
use stabilog_core::config::Config;
use stabilog_core::domain::PluginEvent;
use stabilog_core::ports::PreferenceStore;
use stabilog_report::CounterStore;
use tracing::debug;

use super::{open_preferences, save_preferences};
use crate::output::{get_formatter, OutputFormat};

/// Counter subcommands
#[derive(Debug, Subcommand)]
pub enum CountersCommand {
    /// Show persisted counters and plugin usage
    Show,
    /// Add to a named counter
    Increment {
        /// Preference name, e.g. `stability.crash_count`
        name: String,
        /// Amount to add
        #[arg(long, default_value_t = 1)]
        by: i64,
    },
    /// Record one usage event for a plugin
    #[command(group(
        ArgGroup::new("event")
            .required(true)
            .args(["launch", "instance", "crash"])
    ))]
    Plugin {
        /// Plugin name as reported by the inventory
        name: String,
        #[arg(long)]
        launch: bool,
        #[arg(long)]
        instance: bool,
        #[arg(long)]
        crash: bool,
    },
}

impl CountersCommand {
    pub fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let prefs = open_preferences(config)?;

        match self {
            CountersCommand::Show => {
                let ints = prefs.ints();
                let usage = prefs.plugin_usage();

                if format.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "counters": ints,
                        "plugin_usage": usage,
                    }));
                    return Ok(());
                }

                if ints.is_empty() && usage.is_empty() {
                    formatter.info("No counters recorded.");
                    return Ok(());
                }

                for (name, value) in &ints {
                    println!("{:<48} {:>10}", name, value);
                }
                if !usage.is_empty() {
                    println!();
                    println!(
                        "{:<32} {:>8} {:>10} {:>8}",
                        "Plugin", "Launches", "Instances", "Crashes"
                    );
                    println!("{}", "-".repeat(61));
                    for record in &usage {
                        println!(
                            "{:<32} {:>8} {:>10} {:>8}",
                            record.name, record.launches, record.instances, record.crashes
                        );
                    }
                }
            }

            CountersCommand::Increment { name, by } => {
                if name.trim().is_empty() {
                    bail!("Counter name must not be empty");
                }
                let counters = CounterStore::new(Arc::clone(&prefs) as Arc<dyn PreferenceStore>);
                counters.increment_by(name, *by);
                save_preferences(config, &prefs)?;
                let value = counters.read(name);
                debug!(name = %name, by, value, "Incremented counter");

                if format.is_json() {
                    formatter.print_json(&serde_json::json!({ "name": name, "value": value }));
                } else {
                    formatter.success(&format!("{} = {}", name, value));
                }
            }

            CountersCommand::Plugin {
                name,
                launch,
                instance,
                crash,
            } => {
                let event = if *launch {
                    PluginEvent::Launch
                } else if *instance {
                    PluginEvent::Instance
                } else if *crash {
                    PluginEvent::Crash
                } else {
                    bail!("Specify one of --launch, --instance or --crash");
                };

                let counters = CounterStore::new(Arc::clone(&prefs) as Arc<dyn PreferenceStore>);
                counters.record_plugin_usage(name, event);
                save_preferences(config, &prefs)?;
                debug!(plugin = %name, ?event, "Recorded plugin usage");
                formatter.success(&format!("Recorded {:?} for plugin '{}'", event, name));
            }
        }

        Ok(())
    }
}
