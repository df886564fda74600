//! Prometheus metrics for report assembly
//!
//! Makes report integrity observable to operators: how many reports were
//! built, how many usage events they carried, and how many faults of each
//! kind were hit along the way.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Registry holding all report-builder metrics.
pub struct ReportMetrics {
    registry: Registry,
    /// Counter: finished reports by kind (environment, incremental, usage)
    pub reports_total: IntCounterVec,
    /// Counter: usage events recorded
    pub usage_events_total: IntCounter,
    /// Counter: recoverable data-quality faults by kind
    pub data_quality_faults_total: IntCounterVec,
    /// Counter: build-aborting programming faults by kind
    pub programming_faults_total: IntCounterVec,
}

impl ReportMetrics {
    /// Creates a new `ReportMetrics` with all metrics registered.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new_custom(Some("stabilog".to_string()), None)?;

        let reports_total = IntCounterVec::new(
            Opts::new("reports_total", "Finished reports by kind"),
            &["kind"],
        )?;
        registry.register(Box::new(reports_total.clone()))?;

        let usage_events_total = IntCounter::with_opts(Opts::new(
            "usage_events_total",
            "Usage events recorded into reports",
        ))?;
        registry.register(Box::new(usage_events_total.clone()))?;

        let data_quality_faults_total = IntCounterVec::new(
            Opts::new(
                "data_quality_faults_total",
                "Recoverable data-quality faults by kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(data_quality_faults_total.clone()))?;

        let programming_faults_total = IntCounterVec::new(
            Opts::new(
                "programming_faults_total",
                "Report builds aborted by programming faults, by kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(programming_faults_total.clone()))?;

        Ok(Self {
            registry,
            reports_total,
            usage_events_total,
            data_quality_faults_total,
            programming_faults_total,
        })
    }

    // ========================================================================
    // Recording helpers
    // ========================================================================

    pub fn record_report(&self, kind: &str) {
        self.reports_total.with_label_values(&[kind]).inc();
    }

    pub fn record_usage_event(&self) {
        self.usage_events_total.inc();
    }

    pub fn record_data_quality_fault(&self, kind: &str) {
        self.data_quality_faults_total
            .with_label_values(&[kind])
            .inc();
    }

    pub fn record_programming_fault(&self, kind: &str) {
        self.programming_faults_total
            .with_label_values(&[kind])
            .inc();
    }

    /// Current count of data-quality faults of `kind`.
    pub fn data_quality_faults(&self, kind: &str) -> u64 {
        self.data_quality_faults_total
            .with_label_values(&[kind])
            .get()
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registry_creation() {
        let metrics = ReportMetrics::new().expect("create registry");
        let output = metrics.encode().expect("encode");
        assert!(output.is_empty() || output.contains("stabilog"));
    }

    #[test]
    fn test_record_faults() {
        let metrics = ReportMetrics::new().unwrap();
        metrics.record_data_quality_fault("unmatched_plugin_usage");
        metrics.record_data_quality_fault("unmatched_plugin_usage");
        metrics.record_programming_fault("locked");

        assert_eq!(metrics.data_quality_faults("unmatched_plugin_usage"), 2);
        let output = metrics.encode().unwrap();
        assert!(output.contains("stabilog_data_quality_faults_total"));
        assert!(output.contains("stabilog_programming_faults_total"));
    }

    #[test]
    fn test_encode_produces_valid_output() {
        let metrics = ReportMetrics::new().unwrap();
        metrics.record_report("environment");
        metrics.record_usage_event();

        let output = metrics.encode().unwrap();
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
        assert!(output.contains("stabilog_reports_total"));
        assert!(output.contains("stabilog_usage_events_total 1"));
    }
}
