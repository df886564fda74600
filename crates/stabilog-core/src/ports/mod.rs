//! Port definitions (collaborator interfaces)
//!
//! The report builder depends on these traits; their implementations live
//! outside the builder (the reference adapters ship in `stabilog-report`).
//!
//! ## Ports Overview
//!
//! - [`PreferenceStore`] - Persistent named integers, strings and plugin usage
//! - [`PluginInventoryProvider`] - Currently installed plugins
//! - [`EnvironmentFactsProvider`] - CPU, memory, OS, GPU and display facts
//! - [`FieldTrialProvider`] - Active experiment assignments

pub mod environment_facts;
pub mod field_trials;
pub mod plugin_inventory;
pub mod preference_store;

pub use environment_facts::EnvironmentFactsProvider;
pub use field_trials::FieldTrialProvider;
pub use plugin_inventory::PluginInventoryProvider;
pub use preference_store::PreferenceStore;
