//! Build command - Assemble one report from the persisted counters
//!
//! Provides the `stabilog build` CLI command which:
//! 1. Opens the preference file and assigns client and session ids
//! 2. Records the full environment, or only stability counters with `--incremental`
//! 3. Prints the chosen encoding and persists the reset counters
//! 4. Optionally saves the report to the local report store

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, ValueEnum};
use serde_json::{Map, Value};
use stabilog_core::config::Config;
use stabilog_core::ports::{PluginInventoryProvider, PreferenceStore};
use stabilog_core::prefs;
use stabilog_report::{
    CounterStore, HostFacts, LocalReportStore, ReportBuilder, ReportContext, StaticFieldTrials,
    StaticPluginInventory,
};
use tracing::info;
use uuid::Uuid;

use super::{open_preferences, save_preferences};
use crate::output::{get_formatter, OutputFormat};

/// Encoding printed by `build`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    /// Attribute tree rendered as XML
    Legacy,
    /// Structured record rendered as JSON
    Structured,
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Record only stability counters (crash-recovery log)
    #[arg(long)]
    incremental: bool,

    /// JSON file listing the installed plugins
    #[arg(long)]
    plugins: Option<PathBuf>,

    /// JSON file with per-profile metrics (`profile-<hash>` keys)
    #[arg(long)]
    profile_metrics: Option<PathBuf>,

    /// Encoding to print
    #[arg(long, value_enum, default_value_t = Encoding::Structured)]
    format: Encoding,

    /// Save the report to the local report store
    #[arg(long)]
    save: bool,
}

impl BuildCommand {
    pub fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let prefs = open_preferences(config)?;
        let client_id = ensure_client_id(config, prefs.as_ref());
        let session_id = next_session_id(prefs.as_ref());

        let context = Arc::new(ReportContext::from_config(&config.report)?);
        let trials = StaticFieldTrials::from_config(&config.field_trials, context.anonymizer())
            .context("Invalid field trial configuration")?;
        let plugins = match &self.plugins {
            Some(path) => StaticPluginInventory::load(path)?.plugins(),
            None => Vec::new(),
        };
        let profile_metrics = self
            .profile_metrics
            .as_deref()
            .map(load_profile_metrics)
            .transpose()?;

        info!(
            session_id,
            incremental = self.incremental,
            plugins = plugins.len(),
            "Building report"
        );

        let counters = CounterStore::new(Arc::clone(&prefs) as Arc<dyn PreferenceStore>);
        let mut builder = ReportBuilder::new(
            client_id,
            session_id,
            Arc::clone(&context),
            counters,
            Arc::new(HostFacts::collect()),
            Arc::new(trials),
        );
        if self.incremental {
            builder.record_incremental_stability_elements(&plugins)?;
        } else {
            builder.record_environment(&plugins, profile_metrics.as_ref())?;
        }
        let report = builder.finish()?;

        // The counters in the report were reset; persist that before printing.
        save_preferences(config, &prefs)?;

        for fault in report.data_quality_faults() {
            formatter.warn(&fault.to_string());
        }

        let saved = if self.save {
            let store = LocalReportStore::new(config.storage.reports_dir.clone());
            Some(store.save(&report)?)
        } else {
            None
        };

        if format.is_json() {
            let mut value = serde_json::to_value(report.to_document()?)
                .context("Failed to serialize report")?;
            if let (Some(path), Some(obj)) = (&saved, value.as_object_mut()) {
                obj.insert("saved_to".into(), Value::String(path.display().to_string()));
            }
            formatter.print_json(&value);
        } else {
            match self.format {
                Encoding::Legacy => println!("{}", report.to_xml()?),
                Encoding::Structured => println!("{}", report.to_json()?),
            }
            if let Some(path) = &saved {
                formatter.success(&format!("Saved report to {}", path.display()));
            }
        }

        Ok(())
    }
}

/// Client id from the config, else the persisted one, else a new one. A
/// new id also stamps the install date.
fn ensure_client_id(config: &Config, prefs: &dyn PreferenceStore) -> String {
    if let Some(id) = &config.report.client_id {
        return id.clone();
    }

    let stored = prefs.get_string(prefs::METRICS_CLIENT_ID);
    if !stored.is_empty() {
        return stored;
    }

    let id = Uuid::new_v4().to_string();
    prefs.set_string(prefs::METRICS_CLIENT_ID, &id);
    if prefs.get_string(prefs::METRICS_CLIENT_ID_TIMESTAMP).is_empty() {
        prefs.set_string(
            prefs::METRICS_CLIENT_ID_TIMESTAMP,
            &Utc::now().timestamp().to_string(),
        );
    }
    info!(client_id = %id, "Generated new client id");
    id
}

fn next_session_id(prefs: &dyn PreferenceStore) -> i32 {
    let session = prefs.add_int(prefs::METRICS_SESSION_ID, 1);
    i32::try_from(session).unwrap_or(i32::MAX)
}

fn load_profile_metrics(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile metrics {}", path.display()))?;
    match serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse profile metrics {}", path.display()))?
    {
        Value::Object(map) => Ok(map),
        _ => bail!("Profile metrics in {} must be a JSON object", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::temp_config;
    use stabilog_report::MemoryPreferenceStore;

    fn command() -> BuildCommand {
        BuildCommand {
            incremental: false,
            plugins: None,
            profile_metrics: None,
            format: Encoding::Structured,
            save: false,
        }
    }

    #[test]
    fn test_build_resets_persisted_counters() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        let prefs = MemoryPreferenceStore::new();
        prefs.set_int(prefs::STABILITY_LAUNCH_COUNT, 4);
        prefs.save(&config.storage.preferences_file).unwrap();

        let cmd = BuildCommand {
            save: true,
            ..command()
        };
        cmd.execute(&config, OutputFormat::Human).unwrap();

        let after = MemoryPreferenceStore::load(&config.storage.preferences_file).unwrap();
        assert_eq!(after.get_int(prefs::STABILITY_LAUNCH_COUNT), 0);
        assert_eq!(after.get_int(prefs::METRICS_SESSION_ID), 1);
        assert!(!after.get_string(prefs::METRICS_CLIENT_ID).is_empty());

        let store = LocalReportStore::new(config.storage.reports_dir.clone());
        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, "environment");
    }

    #[test]
    fn test_client_id_is_reused() {
        let prefs = MemoryPreferenceStore::new();
        let config = Config::default();
        let first = ensure_client_id(&config, &prefs);
        let second = ensure_client_id(&config, &prefs);
        assert_eq!(first, second);
        assert!(!prefs
            .get_string(prefs::METRICS_CLIENT_ID_TIMESTAMP)
            .is_empty());
    }

    #[test]
    fn test_configured_client_id_wins() {
        let prefs = MemoryPreferenceStore::new();
        let mut config = Config::default();
        config.report.client_id = Some("fixed".into());
        assert_eq!(ensure_client_id(&config, &prefs), "fixed");
        assert!(prefs.get_string(prefs::METRICS_CLIENT_ID).is_empty());
    }

    #[test]
    fn test_session_ids_increase() {
        let prefs = MemoryPreferenceStore::new();
        assert_eq!(next_session_id(&prefs), 1);
        assert_eq!(next_session_id(&prefs), 2);
    }

    #[test]
    fn test_load_profile_metrics_requires_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(load_profile_metrics(&path).is_err());

        std::fs::write(&path, r#"{"profile-abc": {"theme": "dark"}}"#).unwrap();
        let map = load_profile_metrics(&path).unwrap();
        assert!(map.contains_key("profile-abc"));
    }

    #[test]
    fn test_invalid_profile_metrics_keep_counters() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        let prefs = MemoryPreferenceStore::new();
        prefs.set_int(prefs::STABILITY_LAUNCH_COUNT, 2);
        prefs.save(&config.storage.preferences_file).unwrap();

        let metrics = dir.path().join("metrics.json");
        std::fs::write(&metrics, r#"{"profile-abc": {"ratio": 0.5}}"#).unwrap();
        let cmd = BuildCommand {
            profile_metrics: Some(metrics),
            ..command()
        };
        assert!(cmd.execute(&config, OutputFormat::Human).is_err());

        let after = MemoryPreferenceStore::load(&config.storage.preferences_file).unwrap();
        assert_eq!(after.get_int(prefs::STABILITY_LAUNCH_COUNT), 2);
    }
}
