//! Conversion options.

use serde::{Deserialize, Serialize};

/// Default nesting limit, the same recursion limit serde_json applies when
/// parsing.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What to do with a value the target representation cannot hold, such as
/// a 64-bit integer bound for a bridge map that only stores 32-bit ints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedPolicy {
    /// Abort the conversion with [`TranscodeError::Unsupported`](crate::TranscodeError::Unsupported).
    #[default]
    Reject,
    /// Leave the entry out of the output and log it at debug level.
    Skip,
}

/// Knobs shared by every conversion a [`Transcoder`](crate::Transcoder) runs.
///
/// Deserializable with every field optional, so a partial JSON document
/// such as `{"on_unsupported":"skip"}` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeOptions {
    pub on_unsupported: UnsupportedPolicy,
    /// Maximum number of nested containers, counting the top-level one.
    pub max_depth: usize,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            on_unsupported: UnsupportedPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
