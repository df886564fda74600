//! Environment facts port
//!
//! All accessors are synchronous and side-effect free: implementations are
//! expected to have gathered their facts up front, so reading them while a
//! report is being assembled never blocks.

use crate::domain::environment::{DisplaySize, GpuInfo};

/// Hardware and OS facts for the environment section of a report.
pub trait EnvironmentFactsProvider: Send + Sync {
    /// CPU architecture name, e.g. `x86_64`.
    fn cpu_architecture(&self) -> String;

    /// Physical memory in MiB.
    fn system_ram_mb(&self) -> i32;

    fn os_name(&self) -> String;

    fn os_version(&self) -> String;

    fn gpu(&self) -> GpuInfo;

    fn primary_display(&self) -> DisplaySize;

    fn display_count(&self) -> i32;

    /// Locale the application UI runs in, e.g. `en-US`.
    fn application_locale(&self) -> String;
}
