//! In-memory preference store
//!
//! Thread-safe [`PreferenceStore`] implementation with an optional JSON
//! snapshot file, used by the CLI and by tests. Integer and string values
//! live in `DashMap`s so every single-key operation runs under that key's
//! shard lock; the plugin usage list sits behind one mutex.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use stabilog_core::domain::plugin::{PluginEvent, PluginUsageRecord};
use stabilog_core::ports::PreferenceStore;

/// On-disk form of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceSnapshot {
    #[serde(default)]
    ints: BTreeMap<String, i64>,
    #[serde(default)]
    strings: BTreeMap<String, String>,
    #[serde(default)]
    plugin_stats: Vec<PluginUsageRecord>,
}

/// Preference store held in memory.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    ints: DashMap<String, i64>,
    strings: DashMap<String, String>,
    plugin_stats: Mutex<Vec<PluginUsageRecord>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON snapshot file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: PreferenceSnapshot = serde_json::from_str(&content)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Load from `path`, or start empty when the file does not exist yet.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Write the current contents to `path` as JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// All integer preferences, sorted by name.
    pub fn ints(&self) -> BTreeMap<String, i64> {
        self.ints
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }

    fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            ints: self.ints(),
            strings: self
                .strings
                .iter()
                .map(|e| (e.key().clone(), e.value().clone()))
                .collect(),
            plugin_stats: self.stats().clone(),
        }
    }

    fn from_snapshot(snapshot: PreferenceSnapshot) -> Self {
        Self {
            ints: snapshot.ints.into_iter().collect(),
            strings: snapshot.strings.into_iter().collect(),
            plugin_stats: Mutex::new(snapshot.plugin_stats),
        }
    }

    fn stats(&self) -> MutexGuard<'_, Vec<PluginUsageRecord>> {
        self.plugin_stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_int(&self, name: &str) -> i64 {
        self.ints.get(name).map(|v| *v).unwrap_or(0)
    }

    fn set_int(&self, name: &str, value: i64) {
        self.ints.insert(name.to_string(), value);
    }

    fn take_int(&self, name: &str) -> i64 {
        self.ints.remove(name).map(|(_, v)| v).unwrap_or(0)
    }

    fn add_int(&self, name: &str, delta: i64) -> i64 {
        let mut entry = self.ints.entry(name.to_string()).or_insert(0);
        *entry = entry.saturating_add(delta);
        *entry
    }

    fn get_string(&self, name: &str) -> String {
        self.strings
            .get(name)
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    fn set_string(&self, name: &str, value: &str) {
        self.strings.insert(name.to_string(), value.to_string());
    }

    fn plugin_usage(&self) -> Vec<PluginUsageRecord> {
        self.stats().clone()
    }

    fn take_plugin_usage(&self) -> Vec<PluginUsageRecord> {
        std::mem::take(&mut *self.stats())
    }

    fn record_plugin_usage(&self, name: &str, event: PluginEvent) {
        let mut stats = self.stats();
        match stats.iter_mut().find(|r| r.name == name) {
            Some(record) => record.apply(event),
            None => {
                let mut record = PluginUsageRecord::new(name);
                record.apply(event);
                stats.push(record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_missing_values_default() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get_int("nope"), 0);
        assert_eq!(store.take_int("nope"), 0);
        assert_eq!(store.get_string("nope"), "");
        assert!(store.plugin_usage().is_empty());
    }

    #[test]
    fn test_take_int_resets() {
        let store = MemoryPreferenceStore::new();
        store.set_int("a", 7);
        assert_eq!(store.add_int("a", 3), 10);
        assert_eq!(store.take_int("a"), 10);
        assert_eq!(store.get_int("a"), 0);
    }

    #[test]
    fn test_record_plugin_usage_merges_by_name() {
        let store = MemoryPreferenceStore::new();
        store.record_plugin_usage("Foo", PluginEvent::Launch);
        store.record_plugin_usage("Foo", PluginEvent::Crash);
        store.record_plugin_usage("Bar", PluginEvent::Instance);

        let stats = store.take_plugin_usage();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Foo");
        assert_eq!(stats[0].launches, 1);
        assert_eq!(stats[0].crashes, 1);
        assert_eq!(stats[1].instances, 1);
        assert!(store.plugin_usage().is_empty());
    }

    #[test]
    fn test_concurrent_increments_and_takes_lose_nothing() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let writers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        store.add_int("c", 1);
                    }
                })
            })
            .collect();

        let mut taken = 0;
        for _ in 0..100 {
            taken += store.take_int("c");
        }
        for w in writers {
            w.join().unwrap();
        }
        taken += store.take_int("c");
        assert_eq!(taken, 4000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local_state.json");

        let store = MemoryPreferenceStore::new();
        store.set_int("stability.launch_count", 3);
        store.set_string("user_experience_metrics.client_id_timestamp", "1330000000");
        store.record_plugin_usage("Foo", PluginEvent::Crash);
        store.save(&path).unwrap();

        let loaded = MemoryPreferenceStore::load(&path).unwrap();
        assert_eq!(loaded.get_int("stability.launch_count"), 3);
        assert_eq!(
            loaded.get_string("user_experience_metrics.client_id_timestamp"),
            "1330000000"
        );
        assert_eq!(loaded.plugin_usage()[0].crashes, 1);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryPreferenceStore::load_or_default(&dir.path().join("none.json")).unwrap();
        assert!(store.ints().is_empty());
    }
}
