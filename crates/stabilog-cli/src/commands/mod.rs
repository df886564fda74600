pub mod build;
pub mod counters;
pub mod reports;

use std::sync::Arc;

use anyhow::{Context, Result};
use stabilog_core::config::Config;
use stabilog_report::MemoryPreferenceStore;
use tracing::debug;

/// Opens the preference file named in the configuration. A missing file
/// yields an empty store.
pub(crate) fn open_preferences(config: &Config) -> Result<Arc<MemoryPreferenceStore>> {
    let path = &config.storage.preferences_file;
    debug!(path = %path.display(), "Opening preference file");
    let store = MemoryPreferenceStore::load_or_default(path)
        .with_context(|| format!("Failed to open preferences {}", path.display()))?;
    Ok(Arc::new(store))
}

/// Writes the preference store back to the configured file.
pub(crate) fn save_preferences(config: &Config, prefs: &MemoryPreferenceStore) -> Result<()> {
    let path = &config.storage.preferences_file;
    prefs
        .save(path)
        .with_context(|| format!("Failed to save preferences {}", path.display()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use stabilog_core::config::{Config, ConfigBuilder};

    /// Config whose preference file and report directory live under `dir`.
    pub fn temp_config(dir: &Path) -> Config {
        ConfigBuilder::new()
            .app_version("1.2.3")
            .preferences_file(dir.join("local_state.json"))
            .reports_dir(dir.join("reports"))
            .build()
    }
}
