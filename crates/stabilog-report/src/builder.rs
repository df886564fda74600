//! Report assembly
//!
//! `ReportBuilder` reads counters, preferences and environment facts once
//! and writes every fact through a [`DualEncoder`], so the legacy tree and
//! the structured record are produced by the same pass.
//!
//! ## States
//!
//! ```text
//! Open ──lock()──► Locked ──finish()──► Report
//!   │
//!   └──programming fault──► Aborted ──finish()──► Err(fault)
//! ```

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use stabilog_core::domain::{OmniboxLog, PluginInventoryItem};
use stabilog_core::ports::{EnvironmentFactsProvider, FieldTrialProvider};
use stabilog_core::prefs;
use tracing::{debug, error, info, warn};

use crate::context::ReportContext;
use crate::counter_store::CounterStore;
use crate::encoder::{
    DualEncoder, FloatFact, Int64Fact, IntFact, ReportSink, SectionKind, StrFact,
};
use crate::error::{DataQualityFault, ReportError};
use crate::report::{Report, ReportKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildState {
    Open,
    Locked,
    Aborted,
}

/// Builds one report. Not shared across threads; the counter store it
/// reads from is.
pub struct ReportBuilder {
    client_id: String,
    session_id: i32,
    context: Arc<ReportContext>,
    counters: CounterStore,
    facts: Arc<dyn EnvironmentFactsProvider>,
    trials: Arc<dyn FieldTrialProvider>,
    encoder: DualEncoder,
    state: BuildState,
    abort_fault: Option<ReportError>,
    stability_recorded: bool,
    kind: ReportKind,
    started: Instant,
    num_events: usize,
    data_quality_faults: Vec<DataQualityFault>,
}

impl ReportBuilder {
    pub fn new(
        client_id: impl Into<String>,
        session_id: i32,
        context: Arc<ReportContext>,
        counters: CounterStore,
        facts: Arc<dyn EnvironmentFactsProvider>,
        trials: Arc<dyn FieldTrialProvider>,
    ) -> Self {
        let client_id = client_id.into();
        let version = context.version_string();
        debug!(client_id = %client_id, session_id, version = %version, "Starting report");
        Self {
            encoder: DualEncoder::new(&client_id, session_id, &version),
            client_id,
            session_id,
            context,
            counters,
            facts,
            trials,
            state: BuildState::Open,
            abort_fault: None,
            stability_recorded: false,
            kind: ReportKind::Usage,
            started: Instant::now(),
            num_events: 0,
            data_quality_faults: Vec::new(),
        }
    }

    /// Records the full environment: install facts, plugin inventory,
    /// stability counters, hardware, bookmarks, profile metrics and field
    /// trials.
    pub fn record_environment(
        &mut self,
        plugins: &[PluginInventoryItem],
        profile_metrics: Option<&Map<String, Value>>,
    ) -> Result<(), ReportError> {
        self.ensure_open("record_environment")?;
        self.ensure_no_stability()?;

        // Validate before any counter is consumed so an aborted build
        // leaves the store untouched.
        let profiles = match profile_metrics.map(collect_profile_metrics).transpose() {
            Ok(profiles) => profiles.unwrap_or_default(),
            Err(fault) => return Err(self.abort(fault)),
        };

        let (sources, encoder) = self.parts();
        let faults = sources.write_environment(encoder, plugins, &profiles);
        self.stability_recorded = true;
        self.absorb(faults);
        self.kind = ReportKind::Environment;
        self.settle()?;
        debug!(
            plugins = plugins.len(),
            profiles = profiles.len(),
            "Recorded environment"
        );
        Ok(())
    }

    /// Records only the stability counters and plugin stability, for logs
    /// written while recovering from a crash.
    pub fn record_incremental_stability_elements(
        &mut self,
        plugins: &[PluginInventoryItem],
    ) -> Result<(), ReportError> {
        self.ensure_open("record_incremental_stability_elements")?;
        self.ensure_no_stability()?;

        let (sources, encoder) = self.parts();
        let faults = sources.write_incremental_stability(encoder, plugins);
        self.stability_recorded = true;
        self.absorb(faults);
        self.kind = ReportKind::Incremental;
        self.settle()?;
        debug!("Recorded incremental stability");
        Ok(())
    }

    /// Appends one omnibox event.
    pub fn record_usage_event(&mut self, event: &OmniboxLog) -> Result<(), ReportError> {
        self.ensure_open("record_usage_event")?;

        let (sources, encoder) = self.parts();
        sources.write_omnibox_event(encoder, event);
        self.settle()?;

        self.num_events += 1;
        self.context.metrics().record_usage_event();
        debug!(
            num_events = self.num_events,
            suggestions = event.results.len(),
            "Recorded omnibox event"
        );
        Ok(())
    }

    /// Seals the report. Later record calls fail with
    /// [`ReportError::Locked`] and leave the content unchanged.
    pub fn lock(&mut self) {
        if self.state == BuildState::Open {
            self.state = BuildState::Locked;
            debug!(num_events = self.num_events, "Report locked");
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state == BuildState::Locked
    }

    pub fn num_events(&self) -> usize {
        self.num_events
    }

    pub fn data_quality_faults(&self) -> &[DataQualityFault] {
        &self.data_quality_faults
    }

    /// Locks the report if needed and hands it out. An aborted build
    /// returns the fault that aborted it.
    pub fn finish(mut self) -> Result<Report, ReportError> {
        if self.state == BuildState::Aborted {
            return Err(self.abort_fault.take().unwrap_or(ReportError::Aborted));
        }
        self.lock();

        self.context.metrics().record_report(self.kind.as_str());
        info!(
            kind = %self.kind,
            session_id = self.session_id,
            num_events = self.num_events,
            data_quality_faults = self.data_quality_faults.len(),
            "Report finished"
        );

        let app_version = self.context.version_string();
        let (legacy, structured) = self.encoder.into_parts();
        Ok(Report::new(
            self.kind,
            self.client_id,
            self.session_id,
            app_version,
            legacy,
            structured,
            self.num_events,
            self.data_quality_faults,
        ))
    }

    fn ensure_open(&mut self, operation: &'static str) -> Result<(), ReportError> {
        match self.state {
            BuildState::Open => Ok(()),
            BuildState::Locked => {
                let fault = ReportError::Locked;
                error!(operation, error = %fault, "Record call on a locked report");
                self.context.metrics().record_programming_fault(fault.kind());
                Err(fault)
            }
            BuildState::Aborted => Err(ReportError::Aborted),
        }
    }

    /// A report carries at most one stability snapshot; the counters it
    /// reads are reset, so a second read would lose them.
    fn ensure_no_stability(&mut self) -> Result<(), ReportError> {
        if self.stability_recorded {
            return Err(self.abort(ReportError::StabilityAlreadyRecorded));
        }
        Ok(())
    }

    /// Moves the builder to `Aborted` and returns the fault for the caller.
    fn abort(&mut self, fault: ReportError) -> ReportError {
        error!(error = %fault, "Report build aborted");
        self.context.metrics().record_programming_fault(fault.kind());
        self.state = BuildState::Aborted;
        self.abort_fault = Some(fault.clone());
        fault
    }

    /// Surfaces a nesting fault recorded by the encoder during the last
    /// operation.
    fn settle(&mut self) -> Result<(), ReportError> {
        match self.encoder.take_fault() {
            Some(fault) => Err(self.abort(fault)),
            None => Ok(()),
        }
    }

    fn absorb(&mut self, faults: Vec<DataQualityFault>) {
        for fault in faults {
            warn!(fault = %fault, "Data quality fault");
            self.context.metrics().record_data_quality_fault(fault.kind());
            self.data_quality_faults.push(fault);
        }
    }

    fn parts(&mut self) -> (Sources<'_>, &mut DualEncoder) {
        let elapsed = self.started.elapsed().as_secs();
        let sources = Sources {
            context: &self.context,
            counters: &self.counters,
            facts: self.facts.as_ref(),
            trials: self.trials.as_ref(),
            session_id: self.session_id,
            report_secs: i64::try_from(elapsed).unwrap_or(i64::MAX),
        };
        (sources, &mut self.encoder)
    }
}

/// Read-only view of everything a record operation reads from.
struct Sources<'a> {
    context: &'a ReportContext,
    counters: &'a CounterStore,
    facts: &'a dyn EnvironmentFactsProvider,
    trials: &'a dyn FieldTrialProvider,
    session_id: i32,
    report_secs: i64,
}

impl Sources<'_> {
    fn write_common(&self, sink: &mut DualEncoder) {
        sink.write_int_attribute(IntFact::Session, self.session_id);
        sink.write_int64_attribute(Int64Fact::Time, self.report_secs);
    }

    fn write_environment(
        &self,
        encoder: &mut DualEncoder,
        plugins: &[PluginInventoryItem],
        profiles: &[ProfileMetrics],
    ) -> Vec<DataQualityFault> {
        let mut profile = encoder.section(SectionKind::Profile);
        self.write_common(&mut profile);
        profile.write_attribute(StrFact::AppLocale, &self.facts.application_locale());

        self.write_install(&mut profile);
        self.write_plugin_list(&mut profile, plugins);

        let faults = {
            let mut stability = profile.section(SectionKind::Stability);
            self.write_required_stability(&mut stability);
            self.write_extended_stability(&mut stability);
            self.write_realtime_stability(&mut stability);
            let faults = self.write_plugin_stability(&mut stability, plugins);
            faults
        };

        self.write_hardware(&mut profile);
        self.write_bookmarks(&mut profile);
        for metrics in profiles {
            write_profile_metrics(&mut profile, metrics);
        }
        self.write_field_trials(&mut profile);
        faults
    }

    fn write_incremental_stability(
        &self,
        encoder: &mut DualEncoder,
        plugins: &[PluginInventoryItem],
    ) -> Vec<DataQualityFault> {
        let mut profile = encoder.section(SectionKind::Profile);
        self.write_common(&mut profile);
        self.write_install(&mut profile);

        let mut stability = profile.section(SectionKind::Stability);
        self.write_required_stability(&mut stability);
        self.write_realtime_stability(&mut stability);
        let faults = self.write_plugin_stability(&mut stability, plugins);
        faults
    }

    fn write_install(&self, sink: &mut DualEncoder) {
        let mut date = self
            .counters
            .preferences()
            .get_string(prefs::METRICS_CLIENT_ID_TIMESTAMP);
        if date.is_empty() {
            date.push('0');
        }

        let mut install = sink.section(SectionKind::Install);
        install.write_attribute(StrFact::InstallDate, &date);
        install.write_int_attribute(IntFact::BuildId, 0);
    }

    fn write_plugin_list(&self, sink: &mut DualEncoder, plugins: &[PluginInventoryItem]) {
        let mut list = sink.section(SectionKind::Plugins);
        for plugin in plugins {
            self.write_plugin(&mut list, plugin);
        }
    }

    fn write_plugin(&self, sink: &mut DualEncoder, plugin: &PluginInventoryItem) {
        let anonymizer = self.context.anonymizer();
        let mut section = sink.section(SectionKind::Plugin);
        section.write_attribute(StrFact::PluginName, &anonymizer.anonymize(&plugin.name));
        section.write_attribute(
            StrFact::PluginFilename,
            &anonymizer.anonymize(&plugin.file_name()),
        );
        section.write_attribute(StrFact::PluginVersion, &plugin.version);
        if let Some(enabled) = plugin.enabled {
            section.write_bool_attribute(IntFact::PluginDisabled, !enabled);
        }
    }

    /// Launch and crash counts are written even when zero.
    fn write_required_stability(&self, sink: &mut DualEncoder) {
        for (fact, key) in [
            (IntFact::LaunchCount, prefs::STABILITY_LAUNCH_COUNT),
            (IntFact::CrashCount, prefs::STABILITY_CRASH_COUNT),
        ] {
            sink.write_int_attribute(fact, saturate(self.counters.read_and_reset(key)));
        }
    }

    fn write_extended_stability(&self, sink: &mut DualEncoder) {
        for (fact, key) in [
            (
                IntFact::IncompleteShutdownCount,
                prefs::STABILITY_INCOMPLETE_SESSION_END_COUNT,
            ),
            (
                IntFact::BreakpadRegistrationOk,
                prefs::STABILITY_BREAKPAD_REGISTRATION_OK,
            ),
            (
                IntFact::BreakpadRegistrationFail,
                prefs::STABILITY_BREAKPAD_REGISTRATION_FAIL,
            ),
            (IntFact::DebuggerPresent, prefs::STABILITY_DEBUGGER_PRESENT),
            (
                IntFact::DebuggerNotPresent,
                prefs::STABILITY_DEBUGGER_NOT_PRESENT,
            ),
        ] {
            sink.write_int_attribute(fact, saturate(self.counters.read_and_reset(key)));
        }
    }

    /// Realtime counters are summed by the receiver, so zeros are omitted.
    fn write_realtime_stability(&self, sink: &mut DualEncoder) {
        let mut counters = vec![
            (IntFact::PageLoadCount, prefs::STABILITY_PAGE_LOAD_COUNT),
            (
                IntFact::RendererCrashCount,
                prefs::STABILITY_RENDERER_CRASH_COUNT,
            ),
            (
                IntFact::ExtensionRendererCrashCount,
                prefs::STABILITY_EXTENSION_RENDERER_CRASH_COUNT,
            ),
            (
                IntFact::RendererHangCount,
                prefs::STABILITY_RENDERER_HANG_COUNT,
            ),
            (
                IntFact::ChildProcessCrashCount,
                prefs::STABILITY_CHILD_PROCESS_CRASH_COUNT,
            ),
        ];
        if self.context.include_system_crash_counters() {
            counters.extend([
                (
                    IntFact::OtherUserCrashCount,
                    prefs::STABILITY_OTHER_USER_CRASH_COUNT,
                ),
                (IntFact::KernelCrashCount, prefs::STABILITY_KERNEL_CRASH_COUNT),
                (
                    IntFact::UncleanSystemShutdownCount,
                    prefs::STABILITY_SYSTEM_UNCLEAN_SHUTDOWNS,
                ),
            ]);
        }

        for (fact, key) in counters {
            let value = self.counters.read_and_reset(key);
            if value != 0 {
                sink.write_int_attribute(fact, saturate(value));
            }
        }

        let uptime = self.context.uptime().incremental_secs();
        if uptime > 0 {
            sink.write_int64_attribute(Int64Fact::UptimeSec, uptime);
            self.counters
                .increment_by(prefs::UNINSTALL_METRICS_UPTIME_SEC, uptime);
        }
    }

    /// Joins the usage recorded since the last report with the installed
    /// plugins by exact name. The whole usage list is taken from the store,
    /// so unmatched records are dropped as well; each one is returned as a
    /// data quality fault.
    fn write_plugin_stability(
        &self,
        sink: &mut DualEncoder,
        plugins: &[PluginInventoryItem],
    ) -> Vec<DataQualityFault> {
        let usage = self.counters.take_plugin_usage();
        let mut faults = Vec::new();
        if usage.is_empty() {
            return faults;
        }

        let mut matched = Vec::with_capacity(usage.len());
        for record in usage {
            match plugins.iter().find(|plugin| plugin.name == record.name) {
                Some(plugin) => matched.push((plugin, record)),
                None => faults.push(DataQualityFault::UnmatchedPluginUsage {
                    name_token: self.context.anonymizer().anonymize(&record.name),
                }),
            }
        }
        if matched.is_empty() {
            return faults;
        }

        let mut list = sink.section(SectionKind::Plugins);
        for (plugin, record) in matched {
            let mut entry = list.section(SectionKind::PluginStability);
            self.write_plugin(&mut entry, plugin);
            entry.write_int_attribute(IntFact::PluginLaunchCount, record.launches);
            entry.write_int_attribute(IntFact::PluginInstanceCount, record.instances);
            entry.write_int_attribute(IntFact::PluginCrashCount, record.crashes);
        }
        faults
    }

    fn write_hardware(&self, sink: &mut DualEncoder) {
        {
            let mut cpu = sink.section(SectionKind::Cpu);
            cpu.write_attribute(StrFact::CpuArchitecture, &self.facts.cpu_architecture());
        }
        {
            let mut memory = sink.section(SectionKind::Memory);
            memory.write_int_attribute(IntFact::MemoryMb, self.facts.system_ram_mb());
        }
        {
            let mut os = sink.section(SectionKind::Os);
            os.write_attribute(StrFact::OsName, &self.facts.os_name());
            os.write_attribute(StrFact::OsVersion, &self.facts.os_version());
        }
        {
            let gpu_info = self.facts.gpu();
            let mut gpu = sink.section(SectionKind::Gpu);
            gpu.write_int64_attribute(Int64Fact::GpuVendorId, i64::from(gpu_info.vendor_id));
            gpu.write_int64_attribute(Int64Fact::GpuDeviceId, i64::from(gpu_info.device_id));
            gpu.write_attribute(StrFact::GpuDriverVersion, &gpu_info.driver_version);
            gpu.write_attribute(StrFact::GpuDriverDate, &gpu_info.driver_date);
            let scores = gpu_info.performance;
            gpu.write_float_attribute(FloatFact::GpuGraphicsScore, scores.graphics);
            gpu.write_float_attribute(FloatFact::GpuGamingScore, scores.gaming);
            gpu.write_float_attribute(FloatFact::GpuOverallScore, scores.overall);
        }
        {
            let size = self.facts.primary_display();
            let mut display = sink.section(SectionKind::Display);
            display.write_int_attribute(IntFact::DisplayWidth, size.width);
            display.write_int_attribute(IntFact::DisplayHeight, size.height);
            display.write_int_attribute(IntFact::ScreenCount, self.facts.display_count());
        }
    }

    /// Bookmark and keyword counts are facts, not counters: they are read
    /// without resetting.
    fn write_bookmarks(&self, sink: &mut DualEncoder) {
        let bar_items = self.counters.read(prefs::NUM_BOOKMARKS_ON_BOOKMARK_BAR);
        let bar_folders = self.counters.read(prefs::NUM_FOLDERS_ON_BOOKMARK_BAR);
        let other_items = self
            .counters
            .read(prefs::NUM_BOOKMARKS_IN_OTHER_BOOKMARK_FOLDER);
        let other_folders = self
            .counters
            .read(prefs::NUM_FOLDERS_IN_OTHER_BOOKMARK_FOLDER);

        {
            let mut bookmarks = sink.section(SectionKind::Bookmarks);
            for (name, folders, items) in [
                (
                    "full-tree",
                    bar_folders.saturating_add(other_folders),
                    bar_items.saturating_add(other_items),
                ),
                ("toolbar", bar_folders, bar_items),
            ] {
                let mut location = bookmarks.section(SectionKind::BookmarkLocation);
                location.write_attribute(StrFact::BookmarkLocationName, name);
                location.write_int_attribute(IntFact::BookmarkFolderCount, saturate(folders));
                location.write_int_attribute(IntFact::BookmarkItemCount, saturate(items));
            }
        }

        let mut keywords = sink.section(SectionKind::Keywords);
        keywords.write_int_attribute(
            IntFact::KeywordCount,
            saturate(self.counters.read(prefs::NUM_KEYWORDS)),
        );
    }

    fn write_field_trials(&self, sink: &mut DualEncoder) {
        let trials = self.trials.field_trials();
        if trials.is_empty() {
            return;
        }
        let mut list = sink.section(SectionKind::FieldTrials);
        for trial in trials {
            let mut entry = list.section(SectionKind::FieldTrial);
            entry.write_int64_attribute(Int64Fact::FieldTrialNameId, i64::from(trial.name_id));
            entry.write_int64_attribute(Int64Fact::FieldTrialGroupId, i64::from(trial.group_id));
        }
    }

    fn write_omnibox_event(&self, encoder: &mut DualEncoder, event: &OmniboxLog) {
        let mut element = encoder.section(SectionKind::UiElement);
        element.write_attribute(StrFact::UiAction, "autocomplete");
        element.write_attribute(StrFact::UiTargetIdHash, "");
        element.write_int_attribute(IntFact::UiWindow, 0);
        if let Some(tab) = event.tab_id {
            element.write_int_attribute(IntFact::TabId, tab);
        }
        self.write_common(&mut element);

        let mut autocomplete = element.section(SectionKind::Autocomplete);
        autocomplete.write_int_attribute(IntFact::TypedLength, event.typed_length());
        autocomplete.write_int_attribute(IntFact::NumTerms, event.num_terms());
        autocomplete.write_int_attribute(IntFact::SelectedIndex, event.selected_index);
        autocomplete.write_int_attribute(
            IntFact::CompletedLength,
            event.inline_autocompleted_length,
        );
        if let Some(duration) = event.typing_duration_ms() {
            autocomplete.write_int64_attribute(Int64Fact::TypingDuration, duration);
        }
        autocomplete.write_attribute(StrFact::InputType, event.input_type.as_str());

        for result in &event.results {
            let mut item = autocomplete.section(SectionKind::AutocompleteItem);
            if let Some(provider) = &result.provider {
                item.write_attribute(StrFact::SuggestionProvider, provider);
            }
            item.write_attribute(StrFact::SuggestionResultType, result.match_type.as_str());
            item.write_int_attribute(IntFact::Relevance, result.relevance);
            item.write_bool_attribute(IntFact::IsStarred, result.starred);
        }
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

// ============================================================================
// Profile metrics
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum ParamValue {
    Str(String),
    Int(i32),
}

#[derive(Debug, Clone, PartialEq)]
struct ProfileMetrics {
    id_hash: String,
    params: Vec<(String, ParamValue)>,
}

/// Extracts the `profile-<hash>` entries of the metrics dictionary. Keys
/// without the prefix and non-object values are skipped.
fn collect_profile_metrics(metrics: &Map<String, Value>) -> Result<Vec<ProfileMetrics>, ReportError> {
    let mut profiles = Vec::new();
    for (key, value) in metrics {
        let Some(id_hash) = key.strip_prefix(prefs::PROFILE_PREFIX) else {
            continue;
        };
        let Value::Object(entries) = value else {
            continue;
        };

        let mut params = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            if name == "id" {
                return Err(ReportError::ReservedMetricKey {
                    profile: id_hash.to_string(),
                });
            }
            let unsupported = |kind: &str| ReportError::UnsupportedMetricValue {
                profile: id_hash.to_string(),
                key: name.clone(),
                kind: kind.to_string(),
            };
            let param = match value {
                Value::String(s) => ParamValue::Str(s.clone()),
                Value::Bool(b) => ParamValue::Int(i32::from(*b)),
                Value::Number(n) => match n.as_i64().map(i32::try_from) {
                    Some(Ok(v)) => ParamValue::Int(v),
                    Some(Err(_)) => return Err(unsupported("integer out of range")),
                    None if n.is_f64() => return Err(unsupported("float")),
                    None => return Err(unsupported("integer out of range")),
                },
                Value::Null => return Err(unsupported("null")),
                Value::Array(_) => return Err(unsupported("array")),
                Value::Object(_) => return Err(unsupported("object")),
            };
            params.push((name.clone(), param));
        }
        profiles.push(ProfileMetrics {
            id_hash: id_hash.to_string(),
            params,
        });
    }
    Ok(profiles)
}

fn write_profile_metrics(sink: &mut DualEncoder, metrics: &ProfileMetrics) {
    let mut profile = sink.section(SectionKind::UserProfile);
    profile.write_attribute(StrFact::ProfileIdHash, &metrics.id_hash);
    for (name, value) in &metrics.params {
        let mut param = profile.section(SectionKind::ProfileParam);
        param.write_attribute(StrFact::ProfileParamName, name);
        match value {
            ParamValue::Str(s) => param.write_attribute(StrFact::ProfileParamValue, s),
            ParamValue::Int(v) => param.write_int_attribute(IntFact::ProfileParamValue, *v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metrics(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_collect_profile_metrics_types() {
        let map = metrics(json!({
            "profile-abc": { "name": "work", "sync": true, "tabs": 12 },
            "other": { "ignored": 1 },
            "profile-scalar": 5
        }));
        let profiles = collect_profile_metrics(&map).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id_hash, "abc");
        assert_eq!(
            profiles[0].params,
            vec![
                ("name".to_string(), ParamValue::Str("work".into())),
                ("sync".to_string(), ParamValue::Int(1)),
                ("tabs".to_string(), ParamValue::Int(12)),
            ]
        );
    }

    #[test]
    fn test_collect_profile_metrics_rejects_reserved_id() {
        let map = metrics(json!({ "profile-abc": { "id": "x" } }));
        assert_eq!(
            collect_profile_metrics(&map).unwrap_err(),
            ReportError::ReservedMetricKey {
                profile: "abc".into()
            }
        );
    }

    #[test]
    fn test_collect_profile_metrics_rejects_unsupported_values() {
        for (value, kind) in [
            (json!(1.5), "float"),
            (json!(null), "null"),
            (json!([1]), "array"),
            (json!({ "a": 1 }), "object"),
            (json!(i64::from(i32::MAX) + 1), "integer out of range"),
        ] {
            let map = metrics(json!({ "profile-p": { "k": value } }));
            match collect_profile_metrics(&map).unwrap_err() {
                ReportError::UnsupportedMetricValue { kind: got, .. } => assert_eq!(got, kind),
                other => panic!("unexpected fault {other:?}"),
            }
        }
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(5), 5);
        assert_eq!(saturate(i64::MAX), i32::MAX);
        assert_eq!(saturate(i64::MIN), i32::MIN);
    }
}
