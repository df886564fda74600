//! Hardware facts reported alongside stability data

use serde::{Deserialize, Serialize};

/// GPU performance scores as computed by the platform assessment tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuPerformanceStats {
    pub graphics: f32,
    pub gaming: f32,
    pub overall: f32,
}

/// Primary GPU description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub vendor_id: u32,
    pub device_id: u32,
    pub driver_version: String,
    pub driver_date: String,
    pub performance: GpuPerformanceStats,
}

/// Pixel size of a display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: i32,
    pub height: i32,
}

impl DisplaySize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}
