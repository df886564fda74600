//! Domain error types
//!
//! This module defines error types for domain parsing and validation,
//! such as unknown classification names and malformed field trials.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown omnibox input type name
    #[error("Unknown input type: {0}")]
    UnknownInputType(String),

    /// Unknown autocomplete match type name
    #[error("Unknown match type: {0}")]
    UnknownMatchType(String),

    /// Field trial with an empty name or group
    #[error("Invalid field trial: {0}")]
    InvalidFieldTrial(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::UnknownInputType("bogus".to_string());
        assert_eq!(err.to_string(), "Unknown input type: bogus");

        let err = DomainError::UnknownMatchType("nope".to_string());
        assert_eq!(err.to_string(), "Unknown match type: nope");

        let err = DomainError::InvalidFieldTrial("empty group".to_string());
        assert_eq!(err.to_string(), "Invalid field trial: empty group");
    }

    #[test]
    fn test_error_equality() {
        let err1 = DomainError::ValidationFailed("x".to_string());
        let err2 = DomainError::ValidationFailed("x".to_string());
        let err3 = DomainError::ValidationFailed("y".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
