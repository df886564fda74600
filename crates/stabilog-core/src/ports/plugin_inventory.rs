//! Plugin inventory port

use crate::domain::plugin::PluginInventoryItem;

/// Enumerates the plugins installed right now.
pub trait PluginInventoryProvider: Send + Sync {
    /// Installed plugins, in enumeration order. Enabled flags are filled in
    /// when the provider knows them.
    fn plugins(&self) -> Vec<PluginInventoryItem>;
}
