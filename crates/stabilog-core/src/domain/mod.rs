//! Domain types consumed by the report builder
//!
//! This module contains the plain data exchanged with collaborators:
//! - Plugin usage statistics and installed plugin descriptors
//! - Field trial (experiment, group) pairs
//! - Environment facts (GPU, display)
//! - Omnibox usage events and their classifications
//! - Domain-specific error types

pub mod environment;
pub mod errors;
pub mod field_trial;
pub mod omnibox;
pub mod plugin;

// Re-export commonly used types
pub use environment::{DisplaySize, GpuInfo, GpuPerformanceStats};
pub use errors::DomainError;
pub use field_trial::FieldTrial;
pub use omnibox::{AutocompleteMatch, InputType, MatchType, OmniboxLog, ProviderType};
pub use plugin::{PluginEvent, PluginInventoryItem, PluginUsageRecord};
