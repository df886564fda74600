//! Local report storage
//!
//! Keeps finished reports as JSON documents in
//! `~/.local/share/stabilog/reports/`, named `{kind}-{YYYYMMDD}-{id8}.json`.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::report::{Report, ReportDocument};

/// Entry in the local report store
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub id: String,
    pub kind: String,
    pub date: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// Manages the local directory of saved report files.
pub struct LocalReportStore {
    reports_dir: PathBuf,
}

impl LocalReportStore {
    /// Creates a new store pointing at `reports_dir`.
    pub fn new(reports_dir: PathBuf) -> Self {
        Self { reports_dir }
    }

    /// Returns the default reports directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("stabilog")
            .join("reports")
    }

    /// Writes `report` and returns the path of the new file.
    pub fn save(&self, report: &Report) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.reports_dir).with_context(|| {
            format!("Failed to create reports dir {}", self.reports_dir.display())
        })?;

        let document = report.to_document()?;
        let date = document.created_at.format("%Y%m%d");
        let id = document.id.simple().to_string();
        let filename = format!("{}-{date}-{}.json", document.kind, &id[..8]);
        let path = self.reports_dir.join(filename);

        let json = serde_json::to_string_pretty(&document)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;

        Ok(path)
    }

    /// List all report files in the store, newest date first.
    pub fn list(&self) -> anyhow::Result<Vec<ReportEntry>> {
        if !self.reports_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.reports_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().is_some_and(|e| e == "json") {
                let stem = path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();

                let (kind, date, id) = parse_report_filename(&stem);
                let metadata = entry.metadata()?;

                entries.push(ReportEntry {
                    id,
                    kind,
                    date,
                    size_bytes: metadata.len(),
                    path,
                });
            }
        }

        entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// Read a report by its ID (or any part of its file name).
    pub fn read(&self, id: &str) -> anyhow::Result<Option<ReportDocument>> {
        let Some(entry) = self.find(id)? else {
            return Ok(None);
        };
        let content = std::fs::read_to_string(&entry.path)?;
        let document: ReportDocument = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report {}", entry.path.display()))?;
        Ok(Some(document))
    }

    /// Delete a report by its ID.
    pub fn delete(&self, id: &str) -> anyhow::Result<bool> {
        match self.find(id)? {
            Some(entry) => {
                std::fs::remove_file(&entry.path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete all reports.
    pub fn delete_all(&self) -> anyhow::Result<u32> {
        let entries = self.list()?;
        let mut count = 0;
        for entry in entries {
            if std::fs::remove_file(&entry.path).is_ok() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Returns the reports directory path.
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    fn find(&self, id: &str) -> anyhow::Result<Option<ReportEntry>> {
        Ok(self.list()?.into_iter().find(|entry| {
            entry.id == id
                || entry
                    .path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .contains(id)
        }))
    }
}

/// Parse a report filename like `environment-20260207-a1b2c3d4` into
/// (kind, date, id).
fn parse_report_filename(stem: &str) -> (String, String, String) {
    let parts: Vec<&str> = stem.splitn(3, '-').collect();
    match parts.len() {
        3 => (
            parts[0].to_string(),
            parts[1].to_string(),
            parts[2].to_string(),
        ),
        2 => (parts[0].to_string(), parts[1].to_string(), stem.to_string()),
        _ => ("unknown".to_string(), String::new(), stem.to_string()),
    }
}
