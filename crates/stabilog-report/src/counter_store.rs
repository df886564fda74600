//! Read-and-reset access to persisted counters
//!
//! `CounterStore` is the only way the report builder touches counters.
//! Every counter that lands in a report is taken out of the store in the
//! same step, so a value can never appear in two successive reports.

use std::sync::Arc;

use stabilog_core::domain::plugin::{PluginEvent, PluginUsageRecord};
use stabilog_core::ports::PreferenceStore;

/// Shared handle over the persisted counters. Cloning shares the store.
#[derive(Clone)]
pub struct CounterStore {
    prefs: Arc<dyn PreferenceStore>,
}

impl CounterStore {
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self { prefs }
    }

    /// Returns the accumulated value and resets the counter to zero.
    /// Unset and negative counters read as zero.
    pub fn read_and_reset(&self, name: &str) -> i64 {
        self.prefs.take_int(name).max(0)
    }

    /// Current value without resetting it.
    pub fn read(&self, name: &str) -> i64 {
        self.prefs.get_int(name).max(0)
    }

    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    pub fn increment_by(&self, name: &str, delta: i64) {
        self.prefs.add_int(name, delta);
    }

    /// Per-plugin usage accumulated since the last report, cleared from the
    /// store in the same step.
    pub fn take_plugin_usage(&self) -> Vec<PluginUsageRecord> {
        self.prefs.take_plugin_usage()
    }

    pub fn record_plugin_usage(&self, name: &str, event: PluginEvent) {
        self.prefs.record_plugin_usage(name, event);
    }

    /// Underlying preference store, for direct string reads.
    pub fn preferences(&self) -> &dyn PreferenceStore {
        self.prefs.as_ref()
    }
}

impl std::fmt::Debug for CounterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterStore").finish_non_exhaustive()
    }
}
