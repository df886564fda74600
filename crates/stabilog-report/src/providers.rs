//! Fixed-list providers for field trials and installed plugins

use std::path::Path;

use anyhow::Context;
use stabilog_core::config::FieldTrialConfig;
use stabilog_core::domain::{DomainError, FieldTrial, PluginInventoryItem};
use stabilog_core::ports::{FieldTrialProvider, PluginInventoryProvider};

use crate::anonymizer::Anonymizer;

/// Field trials known up front, e.g. from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct StaticFieldTrials {
    trials: Vec<FieldTrial>,
}

impl StaticFieldTrials {
    pub fn new(trials: Vec<FieldTrial>) -> Self {
        Self { trials }
    }

    /// Hashes configured trial and group names into identifiers.
    pub fn from_config(
        configs: &[FieldTrialConfig],
        anonymizer: &Anonymizer,
    ) -> Result<Self, DomainError> {
        let trials = configs
            .iter()
            .map(|c| FieldTrial::from_names(&c.name, &c.group, |s| anonymizer.name_hash(s)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { trials })
    }
}

impl FieldTrialProvider for StaticFieldTrials {
    fn field_trials(&self) -> Vec<FieldTrial> {
        self.trials.clone()
    }
}

/// A fixed plugin inventory.
#[derive(Debug, Clone, Default)]
pub struct StaticPluginInventory {
    plugins: Vec<PluginInventoryItem>,
}

impl StaticPluginInventory {
    pub fn new(plugins: Vec<PluginInventoryItem>) -> Self {
        Self { plugins }
    }

    /// Loads the inventory from a JSON array of plugin descriptors.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plugin list {}", path.display()))?;
        let plugins: Vec<PluginInventoryItem> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse plugin list {}", path.display()))?;
        Ok(Self { plugins })
    }
}

impl PluginInventoryProvider for StaticPluginInventory {
    fn plugins(&self) -> Vec<PluginInventoryItem> {
        self.plugins.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_field_trials_from_config() {
        let anonymizer = Anonymizer::new();
        let configs = vec![FieldTrialConfig {
            name: "Prerender".into(),
            group: "Enabled".into(),
        }];
        let trials = StaticFieldTrials::from_config(&configs, &anonymizer).unwrap();
        assert_eq!(
            trials.field_trials(),
            vec![FieldTrial::new(
                anonymizer.name_hash("Prerender"),
                anonymizer.name_hash("Enabled")
            )]
        );
    }

    #[test]
    fn test_field_trials_reject_empty_group() {
        let configs = vec![FieldTrialConfig {
            name: "Prerender".into(),
            group: String::new(),
        }];
        assert!(StaticFieldTrials::from_config(&configs, &Anonymizer::new()).is_err());
    }

    #[test]
    fn test_plugin_inventory_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "Flash", "path": "/usr/lib/libflash.so", "version": "11.2", "enabled": true}},
                {{"name": "Java", "path": "/opt/java/libjava.so", "version": "1.7"}}
            ]"#
        )
        .unwrap();

        let inventory = StaticPluginInventory::load(file.path()).unwrap();
        let plugins = inventory.plugins();
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0].enabled, Some(true));
        assert_eq!(plugins[1].enabled, None);
        assert_eq!(plugins[1].file_name(), "libjava.so");
    }

    #[test]
    fn test_plugin_inventory_load_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(StaticPluginInventory::load(file.path()).is_err());
    }
}
