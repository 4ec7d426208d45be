//! Fingerprint value object
//!
//! A content hash over a set of build inputs. Used for change detection
//! between builds.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 fingerprint with the `sha256:` prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Wrap a raw hash string (prefix added if missing)
    pub fn new(raw_hash: &str) -> Self {
        if raw_hash.starts_with(Self::PREFIX) {
            Self(raw_hash.to_string())
        } else {
            Self(format!("{}{}", Self::PREFIX, raw_hash))
        }
    }

    /// Hash a single buffer
    pub fn from_bytes(content: &[u8]) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, Sha256::digest(content)))
    }

    /// Finish an incremental hasher
    pub fn from_hasher(hasher: Sha256) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// First 12 hex characters, for logs
    pub fn short(&self) -> &str {
        let hex = self.hex();
        hex.get(..12).unwrap_or(hex)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<Fingerprint> for String {
    fn from(f: Fingerprint) -> Self {
        f.0
    }
}
