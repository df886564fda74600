//! Configuration module for stabilog.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for stabilog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub field_trials: Vec<FieldTrialConfig>,
}

/// Report assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Application version reported in every log.
    pub app_version: String,
    /// Suffix appended to `app_version` (e.g. a channel marker).
    pub version_extension: String,
    /// Non-official builds get a `-devel` version suffix.
    pub official_build: bool,
    /// Whether OS-level crash/shutdown counters are read and reported.
    pub include_system_crash_counters: bool,
    /// Fixed client id. `None` means one is generated and persisted.
    pub client_id: Option<String>,
}

/// Where persisted state lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file backing the preference store.
    pub preferences_file: PathBuf,
    /// Directory finished reports are saved to.
    pub reports_dir: PathBuf,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

/// One statically configured experiment assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTrialConfig {
    pub name: String,
    pub group: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/stabilog/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("stabilog")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("stabilog")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            version_extension: String::new(),
            official_build: true,
            include_system_crash_counters: cfg!(target_os = "linux"),
            client_id: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = data_dir();
        Self {
            preferences_file: data_dir.join("local_state.json"),
            reports_dir: data_dir.join("reports"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"logging.level"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- report ---
        if self.report.app_version.trim().is_empty() {
            errors.push(ValidationError {
                field: "report.app_version".into(),
                message: "must not be empty".into(),
            });
        }
        if let Some(client_id) = &self.report.client_id {
            if client_id.trim().is_empty() {
                errors.push(ValidationError {
                    field: "report.client_id".into(),
                    message: "must not be empty when set".into(),
                });
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        // --- field_trials ---
        for (i, trial) in self.field_trials.iter().enumerate() {
            if trial.name.is_empty() {
                errors.push(ValidationError {
                    field: format!("field_trials[{i}].name"),
                    message: "must not be empty".into(),
                });
            }
            if trial.group.is_empty() {
                errors.push(ValidationError {
                    field: format!("field_trials[{i}].group"),
                    message: "must not be empty".into(),
                });
            }
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use stabilog_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .app_version("21.0.1180.0")
///     .official_build(false)
///     .field_trial("Prerender", "Enabled")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- report ---

    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.config.report.app_version = version.into();
        self
    }

    pub fn version_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.report.version_extension = extension.into();
        self
    }

    pub fn official_build(mut self, official: bool) -> Self {
        self.config.report.official_build = official;
        self
    }

    pub fn include_system_crash_counters(mut self, include: bool) -> Self {
        self.config.report.include_system_crash_counters = include;
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.report.client_id = Some(client_id.into());
        self
    }

    // --- storage ---

    pub fn preferences_file(mut self, path: PathBuf) -> Self {
        self.config.storage.preferences_file = path;
        self
    }

    pub fn reports_dir(mut self, path: PathBuf) -> Self {
        self.config.storage.reports_dir = path;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- field_trials ---

    pub fn field_trial(mut self, name: impl Into<String>, group: impl Into<String>) -> Self {
        self.config.field_trials.push(FieldTrialConfig {
            name: name.into(),
            group: group.into(),
        });
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // -- Defaults --

    #[test]
    fn default_config_has_sensible_values() {
        let cfg = Config::default();
        assert_eq!(cfg.report.app_version, env!("CARGO_PKG_VERSION"));
        assert!(cfg.report.version_extension.is_empty());
        assert!(cfg.report.official_build);
        assert!(cfg.report.client_id.is_none());
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg
            .storage
            .preferences_file
            .to_string_lossy()
            .contains("stabilog"));
        assert!(cfg.field_trials.is_empty());
    }

    #[test]
    fn default_config_passes_validation() {
        let errors = Config::default().validate();
        assert!(errors.is_empty(), "unexpected validation errors: {errors:?}");
    }

    // -- Loading --

    #[test]
    fn load_from_yaml_file() {
        let yaml = r#"
report:
  app_version: "21.0.1180.0"
  version_extension: "-beta"
  official_build: false
  include_system_crash_counters: true
  client_id: "abc-123"
storage:
  preferences_file: /tmp/stabilog/local_state.json
  reports_dir: /tmp/stabilog/reports
logging:
  level: debug
field_trials:
  - name: Prerender
    group: Enabled
"#;
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(yaml.as_bytes()).unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load config");
        assert_eq!(cfg.report.app_version, "21.0.1180.0");
        assert_eq!(cfg.report.version_extension, "-beta");
        assert!(!cfg.report.official_build);
        assert!(cfg.report.include_system_crash_counters);
        assert_eq!(cfg.report.client_id.as_deref(), Some("abc-123"));
        assert_eq!(
            cfg.storage.reports_dir,
            PathBuf::from("/tmp/stabilog/reports")
        );
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(
            cfg.field_trials,
            vec![FieldTrialConfig {
                name: "Prerender".into(),
                group: "Enabled".into()
            }]
        );
    }

    #[test]
    fn load_partial_yaml_fills_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(b"logging:\n  level: warn\n").unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load config");
        assert_eq!(cfg.logging.level, "warn");
        assert!(cfg.report.official_build);
        assert!(cfg.field_trials.is_empty());
    }

    #[test]
    fn load_or_default_returns_default_on_missing_file() {
        let cfg = Config::load_or_default(Path::new("/nonexistent/config.yaml"));
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn load_returns_error_on_invalid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(b"not: [valid: yaml: {{{").unwrap();
        tmp.flush().unwrap();

        assert!(Config::load(tmp.path()).is_err());
    }

    // -- Validation --

    #[test]
    fn validate_catches_invalid_log_level() {
        let mut cfg = Config::default();
        cfg.logging.level = "verbose".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "logging.level"));
    }

    #[test]
    fn validate_catches_empty_app_version() {
        let mut cfg = Config::default();
        cfg.report.app_version = "  ".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "report.app_version"));
    }

    #[test]
    fn validate_catches_empty_field_trial_parts() {
        let cfg = ConfigBuilder::new().field_trial("", "").build();
        let errors = cfg.validate();
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors.iter().any(|e| e.field == "field_trials[0].name"));
        assert!(errors.iter().any(|e| e.field == "field_trials[0].group"));
    }

    #[test]
    fn validate_accepts_all_valid_log_levels() {
        for level in VALID_LOG_LEVELS {
            let mut cfg = Config::default();
            cfg.logging.level = level.to_string();
            let errors = cfg.validate();
            assert!(
                !errors.iter().any(|e| e.field == "logging.level"),
                "level '{level}' should be valid"
            );
        }
    }

    // -- Builder --

    #[test]
    fn builder_overrides_and_validates() {
        let cfg = ConfigBuilder::new()
            .app_version("1.2.3")
            .version_extension("-canary")
            .official_build(false)
            .client_id("client")
            .logging_level("debug")
            .build_validated()
            .expect("valid config");
        assert_eq!(cfg.report.app_version, "1.2.3");
        assert_eq!(cfg.report.version_extension, "-canary");
        assert!(!cfg.report.official_build);
        assert_eq!(cfg.report.client_id.as_deref(), Some("client"));

        let result = ConfigBuilder::new().logging_level("loud").build_validated();
        assert!(result.is_err());
    }
}
