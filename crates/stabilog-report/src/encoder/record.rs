//! Structured report record
//!
//! Typed tree holding the same facts as the legacy attribute tree. Fields
//! that a report may leave unset are `Option` and skipped when serialized.

use serde::{Deserialize, Serialize};
use stabilog_core::domain::{InputType, MatchType, ProviderType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub client_id: String,
    pub session_id: i32,
    pub system_profile: SystemProfile,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omnibox_events: Vec<OmniboxEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemProfile {
    pub app_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_sec: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_locale: Option<String>,
    #[serde(default)]
    pub hardware: Hardware,
    #[serde(default)]
    pub os: Os,
    #[serde(default)]
    pub stability: Stability,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_trials: Vec<FieldTrialEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bookmarks: Vec<BookmarkLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_profiles: Vec<UserProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hardware {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_ram_mb: Option<i32>,
    #[serde(default)]
    pub gpu: Gpu,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_screen_width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_screen_height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_count: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_date: Option<String>,
    #[serde(default)]
    pub performance_statistics: GpuPerformance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuPerformance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphics_score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaming_score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Os {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Stability counters. Required counters are always set once a stability
/// section was written; realtime counters only when non-zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crash_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incomplete_shutdown_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpad_registration_success_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpad_registration_failure_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debugger_present_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debugger_not_present_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_load_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer_crash_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_renderer_crash_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer_hang_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_process_crash_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_user_crash_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_crash_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unclean_system_shutdown_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime_sec: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugin_stability: Vec<PluginStability>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginStability {
    #[serde(default)]
    pub plugin: Plugin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crash_count: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldTrialEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ProfileParam>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ProfileParamValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileParamValue {
    Int(i32),
    Str(String),
}

/// One autocomplete interaction. The typed text itself is never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OmniboxEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_sec: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_length: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_typed_terms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_length: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typing_duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<MatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_starred: Option<bool>,
}
