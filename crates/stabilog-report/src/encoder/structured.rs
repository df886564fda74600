//! Structured record encoder
//!
//! Maps every fact onto its field of [`StructuredRecord`]. The current
//! section path decides which sub-record a fact lands in. Legacy string
//! values that do not parse into their typed field are logged.

use stabilog_core::domain::{InputType, MatchType, ProviderType};
use tracing::{debug, warn};

use super::facts::{FloatFact, Int64Fact, IntFact, SectionKind, StrFact};
use super::record::{
    BookmarkLocation, FieldTrialEntry, OmniboxEvent, Plugin, PluginStability, ProfileParam,
    ProfileParamValue, StructuredRecord, Suggestion, UserProfile,
};
use super::ReportSink;

/// Sink that fills a [`StructuredRecord`].
///
/// Repeated sections append a new element when opened; facts are routed to
/// the most recent element of the innermost repeated section.
#[derive(Debug)]
pub struct StructuredEncoder {
    record: StructuredRecord,
    open: Vec<SectionKind>,
}

impl StructuredEncoder {
    pub fn new(client_id: &str, session_id: i32, app_version: &str) -> Self {
        let mut record = StructuredRecord {
            client_id: client_id.to_string(),
            session_id,
            ..StructuredRecord::default()
        };
        record.system_profile.app_version = app_version.to_string();
        Self {
            record,
            open: Vec::new(),
        }
    }

    pub fn record(&self) -> &StructuredRecord {
        &self.record
    }

    pub fn into_record(self) -> StructuredRecord {
        self.record
    }

    fn inside(&self, kind: SectionKind) -> bool {
        self.open.contains(&kind)
    }

    fn plugin_mut(&mut self) -> Option<&mut Plugin> {
        if self.inside(SectionKind::PluginStability) {
            self.record
                .system_profile
                .stability
                .plugin_stability
                .last_mut()
                .map(|entry| &mut entry.plugin)
        } else {
            self.record.system_profile.plugins.last_mut()
        }
    }

    fn plugin_stability_mut(&mut self) -> Option<&mut PluginStability> {
        self.record
            .system_profile
            .stability
            .plugin_stability
            .last_mut()
    }

    fn bookmark_mut(&mut self) -> Option<&mut BookmarkLocation> {
        self.record.system_profile.bookmarks.last_mut()
    }

    fn user_profile_mut(&mut self) -> Option<&mut UserProfile> {
        self.record.system_profile.user_profiles.last_mut()
    }

    fn profile_param_mut(&mut self) -> Option<&mut ProfileParam> {
        self.user_profile_mut()
            .and_then(|profile| profile.params.last_mut())
    }

    fn field_trial_mut(&mut self) -> Option<&mut FieldTrialEntry> {
        self.record.system_profile.field_trials.last_mut()
    }

    fn event_mut(&mut self) -> Option<&mut OmniboxEvent> {
        self.record.omnibox_events.last_mut()
    }

    fn suggestion_mut(&mut self) -> Option<&mut Suggestion> {
        self.event_mut()
            .and_then(|event| event.suggestions.last_mut())
    }
}

fn set<T>(slot: Option<&mut Option<T>>, value: T) {
    if let Some(slot) = slot {
        *slot = Some(value);
    }
}

impl ReportSink for StructuredEncoder {
    fn open_section(&mut self, kind: SectionKind) {
        match kind {
            SectionKind::Plugin if !self.inside(SectionKind::PluginStability) => {
                self.record.system_profile.plugins.push(Plugin::default());
            }
            SectionKind::PluginStability => {
                self.record
                    .system_profile
                    .stability
                    .plugin_stability
                    .push(PluginStability::default());
            }
            SectionKind::BookmarkLocation => {
                self.record
                    .system_profile
                    .bookmarks
                    .push(BookmarkLocation::default());
            }
            SectionKind::UserProfile => {
                self.record
                    .system_profile
                    .user_profiles
                    .push(UserProfile::default());
            }
            SectionKind::ProfileParam => {
                if let Some(profile) = self.user_profile_mut() {
                    profile.params.push(ProfileParam::default());
                }
            }
            SectionKind::FieldTrial => {
                self.record
                    .system_profile
                    .field_trials
                    .push(FieldTrialEntry::default());
            }
            SectionKind::UiElement => {
                self.record.omnibox_events.push(OmniboxEvent::default());
            }
            SectionKind::AutocompleteItem => {
                if let Some(event) = self.event_mut() {
                    event.suggestions.push(Suggestion::default());
                }
            }
            _ => {}
        }
        self.open.push(kind);
    }

    fn close_section(&mut self, kind: SectionKind) {
        if let Some(position) = self.open.iter().rposition(|open| *open == kind) {
            self.open.truncate(position);
        }
    }

    fn write_attribute(&mut self, fact: StrFact, value: &str) {
        let value = value.to_string();
        match fact {
            StrFact::InstallDate => {
                let date = value.parse::<i64>().unwrap_or_else(|_| {
                    warn!(value = %value, "Install date is not an integer, recording 0");
                    0
                });
                self.record.system_profile.install_date = Some(date);
            }
            StrFact::AppLocale => self.record.system_profile.application_locale = Some(value),
            StrFact::PluginName => set(self.plugin_mut().map(|p| &mut p.name), value),
            StrFact::PluginFilename => set(self.plugin_mut().map(|p| &mut p.filename), value),
            StrFact::PluginVersion => set(self.plugin_mut().map(|p| &mut p.version), value),
            StrFact::CpuArchitecture => {
                self.record.system_profile.hardware.cpu_architecture = Some(value)
            }
            StrFact::OsName => self.record.system_profile.os.name = Some(value),
            StrFact::OsVersion => self.record.system_profile.os.version = Some(value),
            StrFact::GpuDriverVersion => {
                self.record.system_profile.hardware.gpu.driver_version = Some(value)
            }
            StrFact::GpuDriverDate => {
                self.record.system_profile.hardware.gpu.driver_date = Some(value)
            }
            StrFact::BookmarkLocationName => set(self.bookmark_mut().map(|b| &mut b.name), value),
            StrFact::ProfileIdHash => set(self.user_profile_mut().map(|p| &mut p.id_hash), value),
            StrFact::ProfileParamName => set(self.profile_param_mut().map(|p| &mut p.name), value),
            StrFact::ProfileParamValue => set(
                self.profile_param_mut().map(|p| &mut p.value),
                ProfileParamValue::Str(value),
            ),
            StrFact::UiAction => set(self.event_mut().map(|e| &mut e.action), value),
            StrFact::UiTargetIdHash => set(self.event_mut().map(|e| &mut e.target_id_hash), value),
            StrFact::InputType => match value.parse::<InputType>() {
                Ok(input_type) => set(self.event_mut().map(|e| &mut e.input_type), input_type),
                Err(e) => warn!(error = %e, "Dropping unrecognized input type"),
            },
            StrFact::SuggestionProvider => set(
                self.suggestion_mut().map(|s| &mut s.provider),
                ProviderType::from_name(&value),
            ),
            StrFact::SuggestionResultType => match value.parse::<MatchType>() {
                Ok(match_type) => set(self.suggestion_mut().map(|s| &mut s.result_type), match_type),
                Err(e) => warn!(error = %e, "Dropping unrecognized result type"),
            },
        }
    }

    fn write_int_attribute(&mut self, fact: IntFact, value: i32) {
        let stability = &mut self.record.system_profile.stability;
        match fact {
            IntFact::Session => self.record.session_id = value,
            IntFact::BuildId => self.record.system_profile.build_id = Some(value),
            IntFact::PluginDisabled => set(self.plugin_mut().map(|p| &mut p.is_disabled), value != 0),
            IntFact::LaunchCount => stability.launch_count = Some(value),
            IntFact::CrashCount => stability.crash_count = Some(value),
            IntFact::IncompleteShutdownCount => stability.incomplete_shutdown_count = Some(value),
            IntFact::BreakpadRegistrationOk => {
                stability.breakpad_registration_success_count = Some(value)
            }
            IntFact::BreakpadRegistrationFail => {
                stability.breakpad_registration_failure_count = Some(value)
            }
            IntFact::DebuggerPresent => stability.debugger_present_count = Some(value),
            IntFact::DebuggerNotPresent => stability.debugger_not_present_count = Some(value),
            IntFact::PageLoadCount => stability.page_load_count = Some(value),
            IntFact::RendererCrashCount => stability.renderer_crash_count = Some(value),
            IntFact::ExtensionRendererCrashCount => {
                stability.extension_renderer_crash_count = Some(value)
            }
            IntFact::RendererHangCount => stability.renderer_hang_count = Some(value),
            IntFact::ChildProcessCrashCount => stability.child_process_crash_count = Some(value),
            IntFact::OtherUserCrashCount => stability.other_user_crash_count = Some(value),
            IntFact::KernelCrashCount => stability.kernel_crash_count = Some(value),
            IntFact::UncleanSystemShutdownCount => {
                stability.unclean_system_shutdown_count = Some(value)
            }
            IntFact::PluginLaunchCount => {
                set(self.plugin_stability_mut().map(|s| &mut s.launch_count), value)
            }
            IntFact::PluginInstanceCount => {
                set(self.plugin_stability_mut().map(|s| &mut s.instance_count), value)
            }
            IntFact::PluginCrashCount => {
                set(self.plugin_stability_mut().map(|s| &mut s.crash_count), value)
            }
            IntFact::MemoryMb => self.record.system_profile.hardware.system_ram_mb = Some(value),
            IntFact::DisplayWidth => {
                self.record.system_profile.hardware.primary_screen_width = Some(value)
            }
            IntFact::DisplayHeight => {
                self.record.system_profile.hardware.primary_screen_height = Some(value)
            }
            IntFact::ScreenCount => self.record.system_profile.hardware.screen_count = Some(value),
            IntFact::BookmarkFolderCount => {
                set(self.bookmark_mut().map(|b| &mut b.folder_count), value)
            }
            IntFact::BookmarkItemCount => set(self.bookmark_mut().map(|b| &mut b.item_count), value),
            IntFact::KeywordCount => self.record.system_profile.keyword_count = Some(value),
            IntFact::ProfileParamValue => set(
                self.profile_param_mut().map(|p| &mut p.value),
                ProfileParamValue::Int(value),
            ),
            IntFact::UiWindow => set(self.event_mut().map(|e| &mut e.window_id), value),
            IntFact::TabId => set(self.event_mut().map(|e| &mut e.tab_id), value),
            IntFact::TypedLength => set(self.event_mut().map(|e| &mut e.typed_length), value),
            IntFact::NumTerms => set(self.event_mut().map(|e| &mut e.num_typed_terms), value),
            IntFact::SelectedIndex => set(self.event_mut().map(|e| &mut e.selected_index), value),
            IntFact::CompletedLength => {
                set(self.event_mut().map(|e| &mut e.completed_length), value)
            }
            IntFact::Relevance => set(self.suggestion_mut().map(|s| &mut s.relevance), value),
            IntFact::IsStarred => set(self.suggestion_mut().map(|s| &mut s.is_starred), value != 0),
        }
    }

    fn write_int64_attribute(&mut self, fact: Int64Fact, value: i64) {
        match fact {
            Int64Fact::Time if self.inside(SectionKind::UiElement) => {
                set(self.event_mut().map(|e| &mut e.time_sec), value)
            }
            Int64Fact::Time => self.record.system_profile.time_sec = Some(value),
            Int64Fact::UptimeSec => self.record.system_profile.stability.uptime_sec = Some(value),
            Int64Fact::TypingDuration => {
                set(self.event_mut().map(|e| &mut e.typing_duration_ms), value)
            }
            Int64Fact::GpuVendorId => {
                self.record.system_profile.hardware.gpu.vendor_id = to_u32(fact, value)
            }
            Int64Fact::GpuDeviceId => {
                self.record.system_profile.hardware.gpu.device_id = to_u32(fact, value)
            }
            Int64Fact::FieldTrialNameId => {
                let id = to_u32(fact, value);
                if let Some(trial) = self.field_trial_mut() {
                    trial.name_id = id;
                }
            }
            Int64Fact::FieldTrialGroupId => {
                let id = to_u32(fact, value);
                if let Some(trial) = self.field_trial_mut() {
                    trial.group_id = id;
                }
            }
        }
    }

    fn write_float_attribute(&mut self, fact: FloatFact, value: f32) {
        let stats = &mut self.record.system_profile.hardware.gpu.performance_statistics;
        match fact {
            FloatFact::GpuGraphicsScore => stats.graphics_score = Some(value),
            FloatFact::GpuGamingScore => stats.gaming_score = Some(value),
            FloatFact::GpuOverallScore => stats.overall_score = Some(value),
        }
    }
}

fn to_u32(fact: Int64Fact, value: i64) -> Option<u32> {
    match u32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            debug!(fact = fact.legacy_name(), value, "Identifier out of range for u32");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> StructuredEncoder {
        StructuredEncoder::new("client", 1, "1.0")
    }

    #[test]
    fn test_plugin_inside_stability_entry_is_not_listed() {
        let mut enc = encoder();
        enc.open_section(SectionKind::Plugins);
        enc.open_section(SectionKind::Plugin);
        enc.write_attribute(StrFact::PluginName, "listed");
        enc.close_section(SectionKind::Plugin);
        enc.close_section(SectionKind::Plugins);

        enc.open_section(SectionKind::Stability);
        enc.open_section(SectionKind::PluginStability);
        enc.open_section(SectionKind::Plugin);
        enc.write_attribute(StrFact::PluginName, "stable");
        enc.close_section(SectionKind::Plugin);
        enc.write_int_attribute(IntFact::PluginCrashCount, 2);
        enc.close_section(SectionKind::PluginStability);
        enc.close_section(SectionKind::Stability);

        let profile = &enc.record().system_profile;
        assert_eq!(profile.plugins.len(), 1);
        assert_eq!(profile.plugins[0].name.as_deref(), Some("listed"));
        let entry = &profile.stability.plugin_stability[0];
        assert_eq!(entry.plugin.name.as_deref(), Some("stable"));
        assert_eq!(entry.crash_count, Some(2));
    }

    #[test]
    fn test_time_routes_by_enclosing_section() {
        let mut enc = encoder();
        enc.open_section(SectionKind::Profile);
        enc.write_int64_attribute(Int64Fact::Time, 5);
        enc.close_section(SectionKind::Profile);
        enc.open_section(SectionKind::UiElement);
        enc.write_int64_attribute(Int64Fact::Time, 9);
        enc.close_section(SectionKind::UiElement);

        assert_eq!(enc.record().system_profile.time_sec, Some(5));
        assert_eq!(enc.record().omnibox_events[0].time_sec, Some(9));
    }

    #[test]
    fn test_install_date_falls_back_to_zero() {
        let mut enc = encoder();
        enc.write_attribute(StrFact::InstallDate, "not-a-number");
        assert_eq!(enc.record().system_profile.install_date, Some(0));
        enc.write_attribute(StrFact::InstallDate, "1300000000");
        assert_eq!(enc.record().system_profile.install_date, Some(1_300_000_000));
    }

    #[test]
    fn test_suggestion_fields_are_parsed() {
        let mut enc = encoder();
        enc.open_section(SectionKind::UiElement);
        enc.open_section(SectionKind::Autocomplete);
        enc.write_attribute(StrFact::InputType, "query");
        enc.open_section(SectionKind::AutocompleteItem);
        enc.write_attribute(StrFact::SuggestionProvider, "HistoryQuickProvider");
        enc.write_attribute(StrFact::SuggestionResultType, "search-suggest");
        enc.write_int_attribute(IntFact::IsStarred, 1);
        enc.close_section(SectionKind::AutocompleteItem);
        enc.close_section(SectionKind::Autocomplete);
        enc.close_section(SectionKind::UiElement);

        let event = &enc.record().omnibox_events[0];
        assert_eq!(event.input_type, Some(InputType::Query));
        let suggestion = &event.suggestions[0];
        assert_eq!(suggestion.provider, Some(ProviderType::HistoryQuick));
        assert_eq!(suggestion.result_type, Some(MatchType::SearchSuggest));
        assert_eq!(suggestion.is_starred, Some(true));
    }

    #[test]
    fn test_profile_params_keep_value_type() {
        let mut enc = encoder();
        enc.open_section(SectionKind::UserProfile);
        enc.write_attribute(StrFact::ProfileIdHash, "abc");
        enc.open_section(SectionKind::ProfileParam);
        enc.write_attribute(StrFact::ProfileParamName, "theme");
        enc.write_attribute(StrFact::ProfileParamValue, "dark");
        enc.close_section(SectionKind::ProfileParam);
        enc.open_section(SectionKind::ProfileParam);
        enc.write_attribute(StrFact::ProfileParamName, "tabs");
        enc.write_int_attribute(IntFact::ProfileParamValue, 12);
        enc.close_section(SectionKind::ProfileParam);
        enc.close_section(SectionKind::UserProfile);

        let profile = &enc.record().system_profile.user_profiles[0];
        assert_eq!(profile.id_hash.as_deref(), Some("abc"));
        assert_eq!(
            profile.params[0].value,
            Some(ProfileParamValue::Str("dark".into()))
        );
        assert_eq!(profile.params[1].value, Some(ProfileParamValue::Int(12)));
    }
}
