//! Vocabulary of the report: sections and the scalar facts written into them
//!
//! Each fact maps to one legacy attribute name and one structured field, so
//! a single write call describes the same value to both encodings.

/// Named scope of the report. Repeated kinds (plugin, pluginstability,
/// bookmarklocation, ...) start a new element in the structured record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Profile,
    Install,
    Plugins,
    Plugin,
    Stability,
    PluginStability,
    Cpu,
    Memory,
    Os,
    Gpu,
    Display,
    Bookmarks,
    BookmarkLocation,
    Keywords,
    UserProfile,
    ProfileParam,
    FieldTrials,
    FieldTrial,
    UiElement,
    Autocomplete,
    AutocompleteItem,
}

impl SectionKind {
    pub fn legacy_name(&self) -> &'static str {
        match self {
            SectionKind::Profile => "profile",
            SectionKind::Install => "install",
            SectionKind::Plugins => "plugins",
            SectionKind::Plugin => "plugin",
            SectionKind::Stability => "stability",
            SectionKind::PluginStability => "pluginstability",
            SectionKind::Cpu => "cpu",
            SectionKind::Memory => "memory",
            SectionKind::Os => "os",
            SectionKind::Gpu => "gpu",
            SectionKind::Display => "display",
            SectionKind::Bookmarks => "bookmarks",
            SectionKind::BookmarkLocation => "bookmarklocation",
            SectionKind::Keywords => "keywords",
            SectionKind::UserProfile => "userprofile",
            SectionKind::ProfileParam => "profileparam",
            SectionKind::FieldTrials => "fieldtrials",
            SectionKind::FieldTrial => "fieldtrial",
            SectionKind::UiElement => "uielement",
            SectionKind::Autocomplete => "autocomplete",
            SectionKind::AutocompleteItem => "autocompleteitem",
        }
    }
}

/// String-valued facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrFact {
    InstallDate,
    AppLocale,
    PluginName,
    PluginFilename,
    PluginVersion,
    CpuArchitecture,
    OsName,
    OsVersion,
    GpuDriverVersion,
    GpuDriverDate,
    BookmarkLocationName,
    ProfileIdHash,
    ProfileParamName,
    ProfileParamValue,
    UiAction,
    UiTargetIdHash,
    InputType,
    SuggestionProvider,
    SuggestionResultType,
}

impl StrFact {
    pub fn legacy_name(&self) -> &'static str {
        match self {
            StrFact::InstallDate => "installdate",
            StrFact::AppLocale => "applocale",
            StrFact::PluginName => "name",
            StrFact::PluginFilename => "filename",
            StrFact::PluginVersion => "version",
            StrFact::CpuArchitecture => "arch",
            StrFact::OsName => "name",
            StrFact::OsVersion => "version",
            StrFact::GpuDriverVersion => "driverversion",
            StrFact::GpuDriverDate => "driverdate",
            StrFact::BookmarkLocationName => "name",
            StrFact::ProfileIdHash => "profileidhash",
            StrFact::ProfileParamName => "name",
            StrFact::ProfileParamValue => "value",
            StrFact::UiAction => "action",
            StrFact::UiTargetIdHash => "targetidhash",
            StrFact::InputType => "inputtype",
            StrFact::SuggestionProvider => "provider",
            StrFact::SuggestionResultType => "resulttype",
        }
    }
}

/// 32-bit integer facts. Flags are written as 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntFact {
    Session,
    BuildId,
    PluginDisabled,
    LaunchCount,
    CrashCount,
    IncompleteShutdownCount,
    BreakpadRegistrationOk,
    BreakpadRegistrationFail,
    DebuggerPresent,
    DebuggerNotPresent,
    PageLoadCount,
    RendererCrashCount,
    ExtensionRendererCrashCount,
    RendererHangCount,
    ChildProcessCrashCount,
    OtherUserCrashCount,
    KernelCrashCount,
    UncleanSystemShutdownCount,
    PluginLaunchCount,
    PluginInstanceCount,
    PluginCrashCount,
    MemoryMb,
    DisplayWidth,
    DisplayHeight,
    ScreenCount,
    BookmarkFolderCount,
    BookmarkItemCount,
    KeywordCount,
    ProfileParamValue,
    UiWindow,
    TabId,
    TypedLength,
    NumTerms,
    SelectedIndex,
    CompletedLength,
    Relevance,
    IsStarred,
}

impl IntFact {
    pub fn legacy_name(&self) -> &'static str {
        match self {
            IntFact::Session => "session",
            IntFact::BuildId => "buildid",
            IntFact::PluginDisabled => "disabled",
            IntFact::LaunchCount => "launchcount",
            IntFact::CrashCount => "crashcount",
            IntFact::IncompleteShutdownCount => "incompleteshutdowncount",
            IntFact::BreakpadRegistrationOk => "breakpadregistrationok",
            IntFact::BreakpadRegistrationFail => "breakpadregistrationfail",
            IntFact::DebuggerPresent => "debuggerpresent",
            IntFact::DebuggerNotPresent => "debuggernotpresent",
            IntFact::PageLoadCount => "pageloadcount",
            IntFact::RendererCrashCount => "renderercrashcount",
            IntFact::ExtensionRendererCrashCount => "extensionrenderercrashcount",
            IntFact::RendererHangCount => "rendererhangcount",
            IntFact::ChildProcessCrashCount => "childprocesscrashcount",
            IntFact::OtherUserCrashCount => "otherusercrashcount",
            IntFact::KernelCrashCount => "kernelcrashcount",
            IntFact::UncleanSystemShutdownCount => "systemuncleanshutdowns",
            IntFact::PluginLaunchCount => "launchcount",
            IntFact::PluginInstanceCount => "instancecount",
            IntFact::PluginCrashCount => "crashcount",
            IntFact::MemoryMb => "mb",
            IntFact::DisplayWidth => "xsize",
            IntFact::DisplayHeight => "ysize",
            IntFact::ScreenCount => "screens",
            IntFact::BookmarkFolderCount => "foldercount",
            IntFact::BookmarkItemCount => "itemcount",
            IntFact::KeywordCount => "count",
            IntFact::ProfileParamValue => "value",
            IntFact::UiWindow => "window",
            IntFact::TabId => "tab",
            IntFact::TypedLength => "typedlength",
            IntFact::NumTerms => "numterms",
            IntFact::SelectedIndex => "selectedindex",
            IntFact::CompletedLength => "completedlength",
            IntFact::Relevance => "relevance",
            IntFact::IsStarred => "isstarred",
        }
    }
}

/// 64-bit integer facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Int64Fact {
    Time,
    UptimeSec,
    TypingDuration,
    GpuVendorId,
    GpuDeviceId,
    FieldTrialNameId,
    FieldTrialGroupId,
}

impl Int64Fact {
    pub fn legacy_name(&self) -> &'static str {
        match self {
            Int64Fact::Time => "time",
            Int64Fact::UptimeSec => "uptimesec",
            Int64Fact::TypingDuration => "typingduration",
            Int64Fact::GpuVendorId => "vendorid",
            Int64Fact::GpuDeviceId => "deviceid",
            Int64Fact::FieldTrialNameId => "nameid",
            Int64Fact::FieldTrialGroupId => "groupid",
        }
    }
}

/// Floating point facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatFact {
    GpuGraphicsScore,
    GpuGamingScore,
    GpuOverallScore,
}

impl FloatFact {
    pub fn legacy_name(&self) -> &'static str {
        match self {
            FloatFact::GpuGraphicsScore => "graphicsscore",
            FloatFact::GpuGamingScore => "gamingscore",
            FloatFact::GpuOverallScore => "overallscore",
        }
    }
}
