//! Error types for bridge value conversions.

use crate::bridge::ReadableType;
use thiserror::Error;

/// Errors that can occur while converting between value representations.
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A NaN or infinite number was headed for a JSON target.
    #[error("non-finite number at `{path}` cannot be represented in JSON")]
    NonFiniteNumber { path: String },

    /// A bridge accessor refused the read.
    #[error("bridge access failed at `{path}`: {source}")]
    Access {
        path: String,
        #[source]
        source: AccessError,
    },

    /// A value has no equivalent in the target representation and the
    /// active policy is [`UnsupportedPolicy::Reject`](crate::UnsupportedPolicy::Reject).
    #[error("unsupported value at `{path}`: {reason}")]
    Unsupported { path: String, reason: String },

    /// Containers nested deeper than the configured limit.
    #[error("nesting exceeds the maximum depth of {limit}")]
    DepthLimit { limit: usize },
}

/// Failure reported by a [`ReadableMap`](crate::ReadableMap) or
/// [`ReadableArray`](crate::ReadableArray) getter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("no such key")]
    MissingKey,

    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ReadableType,
        found: ReadableType,
    },
}

/// Convenience alias used throughout bridge-transcode.
pub type Result<T> = std::result::Result<T, TranscodeError>;
