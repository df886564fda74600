//! Identifier anonymization for telemetry reports
//!
//! Replaces identifying strings (plugin names, file names) with stable
//! one-way tokens before they are written into a report. Tokens are a
//! fixed hash with no per-run salt, so the same plugin is correlatable
//! across reports and across processes.

use base64::Engine;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a token.
const TOKEN_BYTES: usize = 16;

/// Deterministic one-way transform of identifying text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymizer;

impl Anonymizer {
    pub fn new() -> Self {
        Self
    }

    /// Base64 token for `text`. Empty input yields the token of the empty string.
    pub fn anonymize(&self, text: &str) -> String {
        let digest = Self::digest(text);
        base64::engine::general_purpose::STANDARD.encode(&digest[..TOKEN_BYTES])
    }

    /// 64-bit numeric form of the same hash.
    pub fn numeric_hash(&self, text: &str) -> u64 {
        let digest = Self::digest(text);
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(bytes)
    }

    /// 32-bit hash used for field trial name and group identifiers.
    pub fn name_hash(&self, text: &str) -> u32 {
        let digest = Self::digest(text);
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&digest[..4]);
        u32::from_be_bytes(bytes)
    }

    fn digest(text: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        digest
    }
}
