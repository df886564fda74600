//! Finished reports
//!
//! A [`Report`] is produced once by `ReportBuilder::finish` and never
//! mutated afterwards. It carries both encodings plus the data quality
//! faults seen while it was built.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::encoder::StructuredRecord;
use crate::error::{DataQualityFault, ReportError};
use crate::section::LegacyTree;

/// What a report was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Full environment and stability snapshot.
    Environment,
    /// Stability counters only, used for crash-recovery logs.
    Incremental,
    /// Usage events only.
    Usage,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Environment => "environment",
            ReportKind::Incremental => "incremental",
            ReportKind::Usage => "usage",
        }
    }
}

impl Display for ReportKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A locked, serialization-ready report.
#[derive(Debug, Clone)]
pub struct Report {
    id: Uuid,
    kind: ReportKind,
    created_at: DateTime<Utc>,
    client_id: String,
    session_id: i32,
    app_version: String,
    legacy: LegacyTree,
    structured: StructuredRecord,
    num_events: usize,
    data_quality_faults: Vec<DataQualityFault>,
}

/// Serialized form of a report as written by the local report store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub id: Uuid,
    pub kind: ReportKind,
    pub created_at: DateTime<Utc>,
    pub client_id: String,
    pub session_id: i32,
    pub app_version: String,
    pub num_events: usize,
    #[serde(default)]
    pub data_quality_faults: Vec<DataQualityFault>,
    pub structured: StructuredRecord,
    pub legacy_xml: String,
}

impl Report {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        kind: ReportKind,
        client_id: String,
        session_id: i32,
        app_version: String,
        legacy: LegacyTree,
        structured: StructuredRecord,
        num_events: usize,
        data_quality_faults: Vec<DataQualityFault>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            created_at: Utc::now(),
            client_id,
            session_id,
            app_version,
            legacy,
            structured,
            num_events,
            data_quality_faults,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn session_id(&self) -> i32 {
        self.session_id
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn legacy(&self) -> &LegacyTree {
        &self.legacy
    }

    pub fn structured(&self) -> &StructuredRecord {
        &self.structured
    }

    /// Number of usage events recorded.
    pub fn num_events(&self) -> usize {
        self.num_events
    }

    pub fn data_quality_faults(&self) -> &[DataQualityFault] {
        &self.data_quality_faults
    }

    /// Legacy encoding rendered as XML.
    pub fn to_xml(&self) -> Result<String, ReportError> {
        self.legacy
            .to_xml(&self.client_id, &self.app_version, self.session_id)
    }

    /// Structured encoding rendered as pretty JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(&self.structured)
            .map_err(|e| ReportError::Render(e.to_string()))
    }

    pub fn to_document(&self) -> Result<ReportDocument, ReportError> {
        Ok(ReportDocument {
            id: self.id,
            kind: self.kind,
            created_at: self.created_at,
            client_id: self.client_id.clone(),
            session_id: self.session_id,
            app_version: self.app_version.clone(),
            num_events: self.num_events,
            data_quality_faults: self.data_quality_faults.clone(),
            structured: self.structured.clone(),
            legacy_xml: self.to_xml()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let structured = StructuredRecord {
            client_id: "client".into(),
            session_id: 2,
            ..StructuredRecord::default()
        };
        Report::new(
            ReportKind::Usage,
            "client".into(),
            2,
            "1.0".into(),
            LegacyTree::new(),
            structured,
            0,
            vec![DataQualityFault::UnmatchedPluginUsage {
                name_token: "tok".into(),
            }],
        )
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ReportKind::Environment.to_string(), "environment");
        assert_eq!(ReportKind::Incremental.as_str(), "incremental");
        assert_eq!(
            serde_json::to_string(&ReportKind::Usage).unwrap(),
            "\"usage\""
        );
    }

    #[test]
    fn test_document_carries_both_encodings() {
        let report = sample();
        let doc = report.to_document().unwrap();
        assert_eq!(doc.id, report.id());
        assert_eq!(doc.structured.session_id, 2);
        assert!(doc.legacy_xml.starts_with("<log clientid=\"client\""));
        assert_eq!(doc.data_quality_faults.len(), 1);

        let json = serde_json::to_string(&doc).unwrap();
        let back: ReportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, ReportKind::Usage);
        assert_eq!(back.data_quality_faults, report.data_quality_faults());
    }

    #[test]
    fn test_to_json_skips_unset_fields() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"client_id\": \"client\""));
        assert!(!json.contains("omnibox_events"));
        assert!(!json.contains("install_date"));
    }
}
