//! Stabilog Report - Dual-encoding stability and environment reports
//!
//! Provides:
//! - `ReportBuilder`: assembles one report from counters and facts
//! - `DualEncoder`: writes every fact to the legacy tree and the structured record
//! - `CounterStore`: read-and-reset access to persisted counters
//! - `ReportContext`: process-wide version, uptime checkpoint and metrics
//! - `Anonymizer`: one-way tokens for plugin names
//! - `ReportMetrics`: Prometheus integrity counters
//! - `MemoryPreferenceStore`, `HostFacts`, static providers: reference adapters
//! - `LocalReportStore`: file-based report management

pub mod anonymizer;
pub mod builder;
pub mod context;
pub mod counter_store;
pub mod encoder;
pub mod error;
pub mod host_facts;
pub mod memory_store;
pub mod metrics;
pub mod providers;
pub mod report;
pub mod section;
pub mod store;

pub use anonymizer::Anonymizer;
pub use builder::ReportBuilder;
pub use context::{ReportContext, UptimeCheckpoint};
pub use counter_store::CounterStore;
pub use encoder::{DualEncoder, ReportSink, SectionKind, StructuredRecord};
pub use error::{DataQualityFault, ReportError};
pub use host_facts::HostFacts;
pub use memory_store::MemoryPreferenceStore;
pub use metrics::ReportMetrics;
pub use providers::{StaticFieldTrials, StaticPluginInventory};
pub use report::{Report, ReportDocument, ReportKind};
pub use section::{AttributeValue, LegacyTree, SectionNode, SectionStack};
pub use store::{LocalReportStore, ReportEntry};
