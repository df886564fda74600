//! Preference store port
//!
//! Persistent key-value storage for counters, string facts and per-plugin
//! usage statistics.
//!
//! ## Design Notes
//!
//! - Missing keys read as zero / empty string; there are no error returns.
//! - `take_int` and `take_plugin_usage` must each run in a single critical
//!   section: an increment racing with a take is either observed by the
//!   take or survives it, never both and never neither.
//! - Implementations are shared across threads (`Send + Sync`).

use crate::domain::plugin::{PluginEvent, PluginUsageRecord};

/// Persistent named values used by the report builder.
pub trait PreferenceStore: Send + Sync {
    /// Current value of an integer preference (0 when unset).
    fn get_int(&self, name: &str) -> i64;

    /// Overwrites an integer preference.
    fn set_int(&self, name: &str, value: i64);

    /// Atomically returns the current value and resets it to zero.
    fn take_int(&self, name: &str) -> i64;

    /// Atomically adds `delta` and returns the new value.
    fn add_int(&self, name: &str, delta: i64) -> i64;

    /// Current value of a string preference (empty when unset).
    fn get_string(&self, name: &str) -> String;

    /// Overwrites a string preference.
    fn set_string(&self, name: &str, value: &str);

    /// Snapshot of the persisted per-plugin usage list.
    fn plugin_usage(&self) -> Vec<PluginUsageRecord>;

    /// Atomically returns the per-plugin usage list and clears it.
    fn take_plugin_usage(&self) -> Vec<PluginUsageRecord>;

    /// Records one usage event against the named plugin, creating its
    /// record when needed.
    fn record_plugin_usage(&self, name: &str, event: PluginEvent);
}
