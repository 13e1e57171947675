//! Fingerprint value type
//!
//! A fingerprint is the lower-case hex rendering of a SHA-256 digest over an
//! entity's canonicalized content fields. Equal content yields equal
//! fingerprints; any difference in content yields a different one. The
//! computation lives in [`crate::core::fingerprint`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex-encoded SHA-256 digest of an entity's canonicalized content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps an already-computed hex digest string.
    ///
    /// Callers are expected to pass the output of the digest functions in
    /// [`crate::core::fingerprint`]; no format validation is performed here.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Returns the hex digest as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
