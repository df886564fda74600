//! Stabilog Core - Domain types, ports and configuration
//!
//! This crate contains the collaborator-facing side of the report builder:
//! - **Domain types** - `PluginUsageRecord`, `PluginInventoryItem`, `FieldTrial`,
//!   `OmniboxLog`, `GpuInfo`, `DisplaySize`
//! - **Port definitions** - Traits for collaborators: `PreferenceStore`,
//!   `PluginInventoryProvider`, `EnvironmentFactsProvider`, `FieldTrialProvider`
//! - **Preference keys** - the persisted counter and fact names
//! - **Configuration** - YAML config with validation and a builder
//!
//! # Architecture
//!
//! The report builder itself lives in `stabilog-report` and only talks to
//! the outside world through the ports defined here. Adapters (in-memory
//! preference store, host facts) implement these traits.

pub mod config;
pub mod domain;
pub mod ports;
pub mod prefs;
