//! Field trial (experiment) assignments

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// An active experiment and the group this client is assigned to, both as
/// hashed identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldTrial {
    pub name_id: u32,
    pub group_id: u32,
}

impl FieldTrial {
    pub const fn new(name_id: u32, group_id: u32) -> Self {
        Self { name_id, group_id }
    }

    /// Builds a trial from its textual name and group, hashing both with `hash`.
    pub fn from_names(
        name: &str,
        group: &str,
        hash: impl Fn(&str) -> u32,
    ) -> Result<Self, DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidFieldTrial("empty trial name".into()));
        }
        if group.is_empty() {
            return Err(DomainError::InvalidFieldTrial(format!(
                "empty group for trial '{name}'"
            )));
        }
        Ok(Self::new(hash(name), hash(group)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len_hash(s: &str) -> u32 {
        s.len() as u32
    }

    #[test]
    fn test_from_names_hashes_both_parts() {
        let trial = FieldTrial::from_names("Prerender", "Enabled", len_hash).unwrap();
        assert_eq!(trial, FieldTrial::new(9, 7));
    }

    #[test]
    fn test_from_names_rejects_empty_parts() {
        assert!(FieldTrial::from_names("", "g", len_hash).is_err());
        assert!(FieldTrial::from_names("t", "", len_hash).is_err());
    }
}
