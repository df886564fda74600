//! Dual encoding of report facts
//!
//! [`ReportSink`] is the single write surface of the report builder. Two
//! sinks implement it: [`LegacyEncoder`] builds the attribute tree and
//! [`StructuredEncoder`] fills the typed record. [`DualEncoder`] forwards
//! every call to both in the same call, so a fact is read once and lands in
//! both encodings with the same value.

mod facts;
mod legacy;
mod record;
mod structured;

use std::ops::{Deref, DerefMut};

pub use facts::{FloatFact, Int64Fact, IntFact, SectionKind, StrFact};
pub use legacy::LegacyEncoder;
pub use record::{
    BookmarkLocation, FieldTrialEntry, Gpu, GpuPerformance, Hardware, OmniboxEvent, Os, Plugin,
    PluginStability, ProfileParam, ProfileParamValue, Stability, StructuredRecord, Suggestion,
    SystemProfile, UserProfile,
};
pub use structured::StructuredEncoder;

use crate::error::ReportError;
use crate::section::LegacyTree;

/// Write surface shared by both encodings.
pub trait ReportSink {
    /// Opens a section nested in the currently open one.
    fn open_section(&mut self, kind: SectionKind);

    /// Closes the innermost open section, which must be of `kind`.
    fn close_section(&mut self, kind: SectionKind);

    fn write_attribute(&mut self, fact: StrFact, value: &str);

    fn write_int_attribute(&mut self, fact: IntFact, value: i32);

    fn write_int64_attribute(&mut self, fact: Int64Fact, value: i64);

    fn write_float_attribute(&mut self, fact: FloatFact, value: f32);

    /// Writes a flag as 0/1.
    fn write_bool_attribute(&mut self, fact: IntFact, value: bool) {
        self.write_int_attribute(fact, i32::from(value));
    }
}

/// Both sinks driven by identical calls.
#[derive(Debug)]
pub struct DualEncoder {
    legacy: LegacyEncoder,
    structured: StructuredEncoder,
}

impl DualEncoder {
    pub fn new(client_id: &str, session_id: i32, app_version: &str) -> Self {
        Self {
            legacy: LegacyEncoder::new(),
            structured: StructuredEncoder::new(client_id, session_id, app_version),
        }
    }

    /// Opens `kind` and returns a guard that closes it when dropped.
    pub fn section(&mut self, kind: SectionKind) -> SectionScope<'_> {
        self.open_section(kind);
        SectionScope {
            encoder: self,
            kind,
        }
    }

    /// Nesting fault recorded by the legacy sink since the last call.
    pub fn take_fault(&mut self) -> Option<ReportError> {
        self.legacy.take_fault()
    }

    pub fn legacy(&self) -> &LegacyTree {
        self.legacy.tree()
    }

    pub fn structured(&self) -> &StructuredRecord {
        self.structured.record()
    }

    pub fn into_parts(self) -> (LegacyTree, StructuredRecord) {
        (self.legacy.into_tree(), self.structured.into_record())
    }
}

impl ReportSink for DualEncoder {
    fn open_section(&mut self, kind: SectionKind) {
        self.legacy.open_section(kind);
        self.structured.open_section(kind);
    }

    fn close_section(&mut self, kind: SectionKind) {
        self.legacy.close_section(kind);
        self.structured.close_section(kind);
    }

    fn write_attribute(&mut self, fact: StrFact, value: &str) {
        self.legacy.write_attribute(fact, value);
        self.structured.write_attribute(fact, value);
    }

    fn write_int_attribute(&mut self, fact: IntFact, value: i32) {
        self.legacy.write_int_attribute(fact, value);
        self.structured.write_int_attribute(fact, value);
    }

    fn write_int64_attribute(&mut self, fact: Int64Fact, value: i64) {
        self.legacy.write_int64_attribute(fact, value);
        self.structured.write_int64_attribute(fact, value);
    }

    fn write_float_attribute(&mut self, fact: FloatFact, value: f32) {
        self.legacy.write_float_attribute(fact, value);
        self.structured.write_float_attribute(fact, value);
    }
}

/// Open section of a [`DualEncoder`]; closes the section when dropped.
///
/// Nested scopes borrow the enclosing one mutably, so they always close
/// before their parent.
pub struct SectionScope<'a> {
    encoder: &'a mut DualEncoder,
    kind: SectionKind,
}

impl SectionScope<'_> {
    pub fn kind(&self) -> SectionKind {
        self.kind
    }
}

impl Deref for SectionScope<'_> {
    type Target = DualEncoder;

    fn deref(&self) -> &DualEncoder {
        self.encoder
    }
}

impl DerefMut for SectionScope<'_> {
    fn deref_mut(&mut self) -> &mut DualEncoder {
        self.encoder
    }
}

impl Drop for SectionScope<'_> {
    fn drop(&mut self) {
        self.encoder.close_section(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_close_in_reverse_order() {
        let mut encoder = DualEncoder::new("client", 3, "1.0");
        {
            let mut profile = encoder.section(SectionKind::Profile);
            profile.write_int_attribute(IntFact::Session, 3);
            {
                let mut cpu = profile.section(SectionKind::Cpu);
                cpu.write_attribute(StrFact::CpuArchitecture, "x86_64");
            }
            let mut memory = profile.section(SectionKind::Memory);
            memory.write_int_attribute(IntFact::MemoryMb, 2048);
        }
        assert!(encoder.take_fault().is_none());

        let cpu = encoder.legacy().find_first(&["profile", "cpu"]).unwrap();
        assert_eq!(cpu.str("arch"), Some("x86_64"));
        let memory = encoder.legacy().find_first(&["profile", "memory"]).unwrap();
        assert_eq!(memory.int("mb"), Some(2048));

        let hardware = &encoder.structured().system_profile.hardware;
        assert_eq!(hardware.cpu_architecture.as_deref(), Some("x86_64"));
        assert_eq!(hardware.system_ram_mb, Some(2048));
    }

    #[test]
    fn test_mismatched_close_is_recorded_as_fault() {
        let mut encoder = DualEncoder::new("client", 1, "1.0");
        encoder.open_section(SectionKind::Profile);
        encoder.open_section(SectionKind::Cpu);
        encoder.close_section(SectionKind::Profile);

        let fault = encoder.take_fault().unwrap();
        assert!(matches!(fault, ReportError::SectionNesting { .. }));
        assert!(encoder.take_fault().is_none());
    }

    #[test]
    fn test_bool_attribute_writes_zero_or_one() {
        let mut encoder = DualEncoder::new("client", 1, "1.0");
        {
            let mut plugins = encoder.section(SectionKind::Plugins);
            let mut plugin = plugins.section(SectionKind::Plugin);
            plugin.write_bool_attribute(IntFact::PluginDisabled, true);
        }
        let plugin = encoder.legacy().find_first(&["plugins", "plugin"]).unwrap();
        assert_eq!(plugin.int("disabled"), Some(1));
        assert_eq!(
            encoder.structured().system_profile.plugins[0].is_disabled,
            Some(true)
        );
    }
}
