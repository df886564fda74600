//! Plugin statistics and inventory
//!
//! Two independently sourced views of plugins meet here: the persisted
//! per-plugin usage counters, and the list of plugins installed right now.
//! The report builder joins them by exact name.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persisted per-plugin counters accumulated since the last report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginUsageRecord {
    pub name: String,
    #[serde(default)]
    pub launches: i32,
    #[serde(default)]
    pub instances: i32,
    #[serde(default)]
    pub crashes: i32,
}

impl PluginUsageRecord {
    /// Creates an empty record for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_launches(mut self, launches: i32) -> Self {
        self.launches = launches;
        self
    }

    pub fn with_instances(mut self, instances: i32) -> Self {
        self.instances = instances;
        self
    }

    pub fn with_crashes(mut self, crashes: i32) -> Self {
        self.crashes = crashes;
        self
    }

    /// Applies one usage event to the counters.
    pub fn apply(&mut self, event: PluginEvent) {
        match event {
            PluginEvent::Launch => self.launches = self.launches.saturating_add(1),
            PluginEvent::Instance => self.instances = self.instances.saturating_add(1),
            PluginEvent::Crash => self.crashes = self.crashes.saturating_add(1),
        }
    }
}

/// A single plugin usage occurrence recorded by a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginEvent {
    Launch,
    Instance,
    Crash,
}

/// A currently installed plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInventoryItem {
    pub name: String,
    pub path: PathBuf,
    pub version: String,
    /// `None` when enabled/disabled flags are not available.
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl PluginInventoryItem {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            version: version.into(),
            enabled: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Base name of the plugin file, lossily converted to UTF-8.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_events() {
        let mut record = PluginUsageRecord::new("Flash");
        record.apply(PluginEvent::Launch);
        record.apply(PluginEvent::Launch);
        record.apply(PluginEvent::Instance);
        record.apply(PluginEvent::Crash);

        assert_eq!(record.launches, 2);
        assert_eq!(record.instances, 1);
        assert_eq!(record.crashes, 1);
    }

    #[test]
    fn test_file_name_is_base_name() {
        let item = PluginInventoryItem::new("Foo", "/usr/lib/plugins/libfoo.so", "1.0");
        assert_eq!(item.file_name(), "libfoo.so");

        let item = PluginInventoryItem::new("Bar", "", "2.0");
        assert_eq!(item.file_name(), "");
    }

    #[test]
    fn test_usage_record_deserializes_missing_counters_as_zero() {
        let record: PluginUsageRecord = serde_json::from_str(r#"{"name":"Foo","crashes":2}"#).unwrap();
        assert_eq!(record.launches, 0);
        assert_eq!(record.instances, 0);
        assert_eq!(record.crashes, 2);
    }
}
