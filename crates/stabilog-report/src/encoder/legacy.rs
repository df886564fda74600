//! Legacy attribute-tree encoder
//!
//! Each opened section becomes a child element of the innermost open one,
//! and attributes are written onto that element under their legacy names.
//! Closing a section other than the innermost records a nesting fault.

use tracing::error;

use super::facts::{FloatFact, Int64Fact, IntFact, SectionKind, StrFact};
use super::ReportSink;
use crate::error::ReportError;
use crate::section::{AttributeValue, LegacyTree, SectionId, SectionStack};

/// Sink that builds the legacy attribute tree.
///
/// Nesting violations cannot be returned from the sink calls, so the first
/// one is kept and handed out by [`LegacyEncoder::take_fault`].
#[derive(Debug, Default)]
pub struct LegacyEncoder {
    stack: SectionStack,
    open: Vec<(SectionKind, SectionId)>,
    fault: Option<ReportError>,
}

impl LegacyEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &LegacyTree {
        self.stack.tree()
    }

    pub fn into_tree(self) -> LegacyTree {
        self.stack.into_tree()
    }

    pub fn take_fault(&mut self) -> Option<ReportError> {
        self.fault.take()
    }

    fn record_fault(&mut self, fault: ReportError) {
        error!(error = %fault, "Legacy section nesting violated");
        if self.fault.is_none() {
            self.fault = Some(fault);
        }
    }

    fn write(&mut self, name: &'static str, value: AttributeValue) {
        if !self.stack.write(name, value) {
            self.record_fault(ReportError::SectionNesting {
                expected: format!("open section for attribute '{name}'"),
                found: "<none>".to_string(),
            });
        }
    }
}

impl ReportSink for LegacyEncoder {
    fn open_section(&mut self, kind: SectionKind) {
        let id = self.stack.open(kind.legacy_name());
        self.open.push((kind, id));
    }

    fn close_section(&mut self, kind: SectionKind) {
        let Some(position) = self.open.iter().rposition(|(open, _)| *open == kind) else {
            let found = self
                .open
                .last()
                .map(|(top, _)| top.legacy_name().to_string())
                .unwrap_or_else(|| "<none>".to_string());
            self.record_fault(ReportError::SectionNesting {
                expected: kind.legacy_name().to_string(),
                found,
            });
            return;
        };

        let (_, id) = self.open[position];
        match self.stack.close(id) {
            Ok(()) => {
                self.open.remove(position);
            }
            Err(fault) => self.record_fault(fault),
        }
    }

    fn write_attribute(&mut self, fact: StrFact, value: &str) {
        self.write(fact.legacy_name(), AttributeValue::Str(value.to_string()));
    }

    fn write_int_attribute(&mut self, fact: IntFact, value: i32) {
        self.write(fact.legacy_name(), AttributeValue::Int(value));
    }

    fn write_int64_attribute(&mut self, fact: Int64Fact, value: i64) {
        self.write(fact.legacy_name(), AttributeValue::Int64(value));
    }

    fn write_float_attribute(&mut self, fact: FloatFact, value: f32) {
        self.write(fact.legacy_name(), AttributeValue::Float(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_land_in_innermost_section() {
        let mut encoder = LegacyEncoder::new();
        encoder.open_section(SectionKind::Profile);
        encoder.write_int_attribute(IntFact::Session, 7);
        encoder.open_section(SectionKind::Stability);
        encoder.write_int_attribute(IntFact::LaunchCount, 3);
        encoder.write_int64_attribute(Int64Fact::UptimeSec, 42);
        encoder.close_section(SectionKind::Stability);
        encoder.close_section(SectionKind::Profile);
        assert!(encoder.take_fault().is_none());

        let tree = encoder.tree();
        let profile = tree.find_first(&["profile"]).unwrap();
        assert_eq!(profile.int("session"), Some(7));
        let stability = tree.find_first(&["profile", "stability"]).unwrap();
        assert_eq!(stability.int("launchcount"), Some(3));
        assert_eq!(stability.int("uptimesec"), Some(42));
    }

    #[test]
    fn test_write_without_open_section_is_a_fault() {
        let mut encoder = LegacyEncoder::new();
        encoder.write_int_attribute(IntFact::LaunchCount, 1);
        assert!(matches!(
            encoder.take_fault(),
            Some(ReportError::SectionNesting { .. })
        ));
        assert!(encoder.tree().is_empty());
    }

    #[test]
    fn test_closing_unopened_kind_is_a_fault() {
        let mut encoder = LegacyEncoder::new();
        encoder.open_section(SectionKind::Profile);
        encoder.close_section(SectionKind::Stability);
        assert_eq!(
            encoder.take_fault(),
            Some(ReportError::SectionNesting {
                expected: "stability".into(),
                found: "profile".into(),
            })
        );
    }

    #[test]
    fn test_first_fault_is_kept() {
        let mut encoder = LegacyEncoder::new();
        encoder.close_section(SectionKind::Cpu);
        encoder.close_section(SectionKind::Os);
        assert_eq!(
            encoder.take_fault(),
            Some(ReportError::SectionNesting {
                expected: "cpu".into(),
                found: "<none>".into(),
            })
        );
    }
}
