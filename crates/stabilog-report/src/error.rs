//! Report build faults
//!
//! Two families of faults exist:
//! - [`ReportError`]: defects in the calling code (write after lock, broken
//!   section nesting, malformed profile metrics). These abort the build.
//! - [`DataQualityFault`]: bad persisted input (a plugin usage record with
//!   no installed plugin). These are counted and the build continues.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faults that abort the report build.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A record operation was called after the report was locked
    #[error("report is locked; no further records may be written")]
    Locked,

    /// The build was already aborted by an earlier fault
    #[error("report build was aborted by an earlier fault")]
    Aborted,

    /// A second stability snapshot was requested from the same report
    #[error("stability was already recorded in this report")]
    StabilityAlreadyRecorded,

    /// A section was closed out of LIFO order
    #[error("section nesting violated: expected to close {expected}, found {found}")]
    SectionNesting {
        /// Section the caller tried to close
        expected: String,
        /// Section actually on top of the stack
        found: String,
    },

    /// A profile metric value has a type that cannot be reported
    #[error("unsupported value of type {kind} for metric '{key}' in profile '{profile}'")]
    UnsupportedMetricValue {
        profile: String,
        key: String,
        kind: String,
    },

    /// A profile metric used the reserved `id` key
    #[error("reserved key 'id' used in metrics for profile '{profile}'")]
    ReservedMetricKey { profile: String },

    /// Rendering the legacy encoding failed
    #[error("failed to render report: {0}")]
    Render(String),
}

impl ReportError {
    /// True for faults that indicate a defect in the calling code.
    pub fn is_programming_fault(&self) -> bool {
        !matches!(self, ReportError::Render(_))
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::Locked => "locked",
            ReportError::Aborted => "aborted",
            ReportError::StabilityAlreadyRecorded => "stability_already_recorded",
            ReportError::SectionNesting { .. } => "section_nesting",
            ReportError::UnsupportedMetricValue { .. } => "unsupported_metric_value",
            ReportError::ReservedMetricKey { .. } => "reserved_metric_key",
            ReportError::Render(_) => "render",
        }
    }
}

/// Recoverable faults accumulated alongside a finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityFault {
    /// A persisted plugin usage record matched no installed plugin. Only the
    /// anonymized name is kept.
    UnmatchedPluginUsage { name_token: String },
}

impl DataQualityFault {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DataQualityFault::UnmatchedPluginUsage { .. } => "unmatched_plugin_usage",
        }
    }
}

impl Display for DataQualityFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityFault::UnmatchedPluginUsage { name_token } => {
                write!(f, "plugin usage for {name_token} has no installed plugin")
            }
        }
    }
}
