//! Process-wide report context
//!
//! State that outlives a single report (the uptime checkpoint, the version
//! extension, the metrics registry) is held here and handed to each
//! `ReportBuilder` instead of living in globals.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use stabilog_core::config::ReportConfig;

use crate::anonymizer::Anonymizer;
use crate::metrics::ReportMetrics;

/// Monotonic checkpoint used to compute uptime since the previous report.
#[derive(Debug, Default)]
pub struct UptimeCheckpoint {
    last: Mutex<Option<Instant>>,
}

impl UptimeCheckpoint {
    /// A checkpoint whose baseline is set by its first reading.
    pub fn new() -> Self {
        Self::default()
    }

    /// A checkpoint with an explicit baseline.
    pub fn starting_at(baseline: Instant) -> Self {
        Self {
            last: Mutex::new(Some(baseline)),
        }
    }

    /// Whole seconds elapsed since the previous reading; the first reading
    /// of a fresh checkpoint returns 0. The checkpoint moves to now on
    /// every call.
    pub fn incremental_secs(&self) -> i64 {
        self.incremental_secs_at(Instant::now())
    }

    pub fn incremental_secs_at(&self, now: Instant) -> i64 {
        let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());
        let baseline = *last.get_or_insert(now);
        *last = Some(now);
        let elapsed = now.saturating_duration_since(baseline).as_secs();
        i64::try_from(elapsed).unwrap_or(i64::MAX)
    }
}

/// Shared settings and state for every report built in this process.
pub struct ReportContext {
    app_version: String,
    version_extension: String,
    official_build: bool,
    include_system_crash_counters: bool,
    anonymizer: Anonymizer,
    metrics: Arc<ReportMetrics>,
    uptime: UptimeCheckpoint,
}

impl ReportContext {
    /// Creates a context for an official build of `app_version`.
    pub fn new(app_version: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            app_version: app_version.into(),
            version_extension: String::new(),
            official_build: true,
            include_system_crash_counters: false,
            anonymizer: Anonymizer::new(),
            metrics: Arc::new(ReportMetrics::new()?),
            uptime: UptimeCheckpoint::new(),
        })
    }

    /// Creates a context from the `report` configuration section.
    pub fn from_config(config: &ReportConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.app_version.clone())?
            .with_version_extension(config.version_extension.clone())
            .with_official_build(config.official_build)
            .with_system_crash_counters(config.include_system_crash_counters))
    }

    pub fn with_version_extension(mut self, extension: impl Into<String>) -> Self {
        self.version_extension = extension.into();
        self
    }

    pub fn with_official_build(mut self, official: bool) -> Self {
        self.official_build = official;
        self
    }

    pub fn with_system_crash_counters(mut self, include: bool) -> Self {
        self.include_system_crash_counters = include;
        self
    }

    pub fn with_uptime_baseline(mut self, baseline: Instant) -> Self {
        self.uptime = UptimeCheckpoint::starting_at(baseline);
        self
    }

    /// Version reported in every log: the app version, the extension, and
    /// `-devel` for unofficial builds.
    pub fn version_string(&self) -> String {
        let mut version = self.app_version.clone();
        version.push_str(&self.version_extension);
        if !self.official_build {
            version.push_str("-devel");
        }
        version
    }

    pub fn version_extension(&self) -> &str {
        &self.version_extension
    }

    pub fn include_system_crash_counters(&self) -> bool {
        self.include_system_crash_counters
    }

    pub fn anonymizer(&self) -> &Anonymizer {
        &self.anonymizer
    }

    pub fn metrics(&self) -> &ReportMetrics {
        &self.metrics
    }

    /// Shared handle on the metrics registry.
    pub fn metrics_handle(&self) -> Arc<ReportMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn uptime(&self) -> &UptimeCheckpoint {
        &self.uptime
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_first_uptime_reading_is_zero() {
        let uptime = UptimeCheckpoint::new();
        let t0 = Instant::now();
        assert_eq!(uptime.incremental_secs_at(t0), 0);
        assert_eq!(uptime.incremental_secs_at(t0 + Duration::from_secs(42)), 42);
        assert_eq!(uptime.incremental_secs_at(t0 + Duration::from_secs(50)), 8);
    }

    #[test]
    fn test_uptime_last_read_wins() {
        let t0 = Instant::now();
        let uptime = UptimeCheckpoint::starting_at(t0);
        assert_eq!(uptime.incremental_secs_at(t0 + Duration::from_millis(1500)), 1);
        // The half second is not carried over.
        assert_eq!(uptime.incremental_secs_at(t0 + Duration::from_millis(2000)), 0);
    }

    #[test]
    fn test_version_string() {
        let ctx = ReportContext::new("21.0.1180.0").unwrap();
        assert_eq!(ctx.version_string(), "21.0.1180.0");

        let ctx = ReportContext::new("21.0.1180.0")
            .unwrap()
            .with_version_extension("-beta")
            .with_official_build(false);
        assert_eq!(ctx.version_string(), "21.0.1180.0-beta-devel");
        assert_eq!(ctx.version_extension(), "-beta");
    }

    #[test]
    fn test_from_config() {
        let config = ReportConfig {
            app_version: "1.0".into(),
            version_extension: "-x".into(),
            official_build: true,
            include_system_crash_counters: true,
            client_id: None,
        };
        let ctx = ReportContext::from_config(&config).unwrap();
        assert_eq!(ctx.version_string(), "1.0-x");
        assert!(ctx.include_system_crash_counters());
    }
}
