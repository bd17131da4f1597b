//! Canonical JSON bytes and content digests for search artifacts.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. Compact form, no whitespace.
//! 3. Numbers must be integers. Floats are rejected so that output never
//!    depends on float formatting; callers render real values as strings.
//!
//! `serde_json::Map` is ordered by key unless the `preserve_order` feature is
//! enabled, which this workspace never does, so serialization after the number
//! check yields sorted keys directly.

use sha2::{Digest, Sha256};

/// Domain prefix for search trace digests.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"STATESPACE::SEARCH_TRACE::V1\0";

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer (float, NaN, Infinity).
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
    /// `serde_json` failed to write the value.
    #[error("canonical JSON serialization failed: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for CanonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not an `i64`
/// or `u64`, and [`CanonError::Serialization`] if the writer fails.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    reject_floats(value)?;
    Ok(serde_json::to_vec(value)?)
}

fn reject_floats(value: &serde_json::Value) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
            Err(CanonError::NonIntegerNumber { raw: n.to_string() })
        }
        serde_json::Value::Array(items) => items.iter().try_for_each(reject_floats),
        serde_json::Value::Object(map) => map.values().try_for_each(reject_floats),
        _ => Ok(()),
    }
}

/// SHA-256 over `domain || data`, formatted as `"sha256:<hex>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}
