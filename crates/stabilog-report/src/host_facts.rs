//! Host environment facts
//!
//! Gathers non-identifying hardware and OS facts once, at construction.
//! Never includes hostname or username. GPU and display facts are not
//! probed and default to zero unless supplied by the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stabilog_core::domain::{DisplaySize, GpuInfo};
use stabilog_core::ports::EnvironmentFactsProvider;

/// Environment facts collected from the running host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostFacts {
    pub cpu_architecture: String,
    pub system_ram_mb: i32,
    pub os_name: String,
    pub os_version: String,
    pub gpu: GpuInfo,
    pub primary_display: DisplaySize,
    pub display_count: i32,
    pub application_locale: String,
}

impl HostFacts {
    /// Collect facts from the current system.
    pub fn collect() -> Self {
        Self {
            cpu_architecture: std::env::consts::ARCH.to_string(),
            system_ram_mb: read_ram_mb(Path::new("/proc/meminfo")),
            os_name: std::env::consts::OS.to_string(),
            os_version: read_os_release(Path::new("/proc/sys/kernel/osrelease")),
            gpu: GpuInfo::default(),
            primary_display: DisplaySize::default(),
            display_count: 0,
            application_locale: locale_from_env(std::env::var("LANG").ok().as_deref()),
        }
    }

    pub fn with_gpu(mut self, gpu: GpuInfo) -> Self {
        self.gpu = gpu;
        self
    }

    pub fn with_display(mut self, primary: DisplaySize, count: i32) -> Self {
        self.primary_display = primary;
        self.display_count = count;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.application_locale = locale.into();
        self
    }
}

impl EnvironmentFactsProvider for HostFacts {
    fn cpu_architecture(&self) -> String {
        self.cpu_architecture.clone()
    }

    fn system_ram_mb(&self) -> i32 {
        self.system_ram_mb
    }

    fn os_name(&self) -> String {
        self.os_name.clone()
    }

    fn os_version(&self) -> String {
        self.os_version.clone()
    }

    fn gpu(&self) -> GpuInfo {
        self.gpu.clone()
    }

    fn primary_display(&self) -> DisplaySize {
        self.primary_display
    }

    fn display_count(&self) -> i32 {
        self.display_count
    }

    fn application_locale(&self) -> String {
        self.application_locale.clone()
    }
}

fn read_ram_mb(path: &Path) -> i32 {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| parse_mem_total_mb(&content))
        .unwrap_or_default()
}

/// `MemTotal` from `/proc/meminfo` content, in MiB.
fn parse_mem_total_mb(meminfo: &str) -> Option<i32> {
    let line = meminfo.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kib: i64 = line.split_whitespace().nth(1)?.parse().ok()?;
    i32::try_from(kib / 1024).ok()
}

fn read_os_release(path: &Path) -> String {
    std::fs::read_to_string(path)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Turns a POSIX locale (`en_US.UTF-8`) into a language tag (`en-US`).
fn locale_from_env(lang: Option<&str>) -> String {
    match lang {
        None | Some("") | Some("C") | Some("POSIX") => "en-US".to_string(),
        Some(lang) => {
            let base = lang.split(['.', '@']).next().unwrap_or(lang);
            base.replace('_', "-")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_host_facts() {
        let facts = HostFacts::collect();
        assert_eq!(facts.os_name, std::env::consts::OS);
        assert!(!facts.cpu_architecture.is_empty());
        assert!(facts.system_ram_mb >= 0);
    }

    #[test]
    fn test_parse_mem_total() {
        let meminfo = "MemTotal:       16318412 kB\nMemFree:         1000 kB\n";
        assert_eq!(parse_mem_total_mb(meminfo), Some(15935));
        assert_eq!(parse_mem_total_mb("MemFree: 1 kB"), None);
    }

    #[test]
    fn test_read_os_release_missing_file() {
        assert_eq!(read_os_release(Path::new("/nonexistent/osrelease")), "");
    }

    #[test]
    fn test_locale_from_env() {
        assert_eq!(locale_from_env(Some("de_DE.UTF-8")), "de-DE");
        assert_eq!(locale_from_env(Some("sr_RS@latin")), "sr-RS");
        assert_eq!(locale_from_env(Some("C")), "en-US");
        assert_eq!(locale_from_env(None), "en-US");
    }

    #[test]
    fn test_overrides() {
        let facts = HostFacts::collect()
            .with_display(DisplaySize::new(1920, 1080), 2)
            .with_locale("fr-FR");
        assert_eq!(facts.primary_display(), DisplaySize::new(1920, 1080));
        assert_eq!(facts.display_count(), 2);
        assert_eq!(facts.application_locale(), "fr-FR");
    }

    #[test]
    fn test_host_facts_serialization() {
        let facts = HostFacts::collect();
        let json = serde_json::to_string(&facts).unwrap();
        let back: HostFacts = serde_json::from_str(&json).unwrap();
        assert_eq!(back.os_name, facts.os_name);
        assert_eq!(back.cpu_architecture, facts.cpu_architecture);
    }
}
