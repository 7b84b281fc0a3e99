//! # bridge-transcode
//!
//! Structural conversion between the key/value shapes that meet at a mobile
//! app's native/script bridge: read-only bridge maps, write-only bridge
//! maps, generic in-memory containers, and JSON objects.
//!
//! Every conversion walks the input tree once and rebuilds it in the target
//! representation. Scalars map one to one, with one deliberate asymmetry:
//! numbers read from a bridge map are always doubles, while numbers read
//! from JSON keep their integer or float form.
//!
//! ## Quick start
//!
//! ```rust
//! use bridge_transcode::{read_map_to_json, BridgeMap, WritableMap};
//! use serde_json::json;
//!
//! let mut inner = BridgeMap::new();
//! inner.put_double("c", 3.5);
//!
//! let mut map = BridgeMap::new();
//! map.put_boolean("a", true);
//! map.put_map("b", inner);
//! map.put_null("d");
//!
//! let object = read_map_to_json(&map).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(object),
//!     json!({"a": true, "b": {"c": 3.5}, "d": null})
//! );
//! ```
//!
//! ## Modules
//!
//! - [`bridge`]: bridge collaborator traits and the [`ReadableType`] tag
//! - [`memory`]: in-memory [`BridgeMap`] and [`BridgeArray`]
//! - [`map`]: map conversions
//! - [`array`]: array conversions
//! - [`attributes`]: flat user-attribute maps
//! - [`options`]: [`TranscodeOptions`] and [`UnsupportedPolicy`]
//! - [`error`]: error types
//! - [`types`]: [`Dynamic`] and the container aliases
//!
//! The free functions below run a [`Transcoder`] with default options.

pub mod array;
pub mod attributes;
pub mod bridge;
pub mod error;
pub mod map;
pub mod memory;
pub mod options;
mod trail;
mod transcoder;
pub mod types;

pub use bridge::{ReadableArray, ReadableMap, ReadableType, WritableArray, WritableMap};
pub use error::{AccessError, Result, TranscodeError};
pub use map::json_to_string_map;
pub use memory::{BridgeArray, BridgeMap};
pub use options::{TranscodeOptions, UnsupportedPolicy, DEFAULT_MAX_DEPTH};
pub use transcoder::Transcoder;
pub use types::{AttributeMap, AttributeValue, Dynamic, DynamicMap, StringMap};

use serde_json::{Map, Value};

/// See [`Transcoder::read_map_to_json`].
pub fn read_map_to_json<R: ReadableMap>(map: &R) -> Result<Map<String, Value>> {
    Transcoder::default().read_map_to_json(map)
}

/// See [`Transcoder::json_to_dynamic_map`].
pub fn json_to_dynamic_map(object: &Map<String, Value>) -> Result<DynamicMap> {
    Transcoder::default().json_to_dynamic_map(object)
}

/// See [`Transcoder::read_map_to_dynamic`].
pub fn read_map_to_dynamic<R: ReadableMap>(map: &R) -> Result<DynamicMap> {
    Transcoder::default().read_map_to_dynamic(map)
}

/// See [`Transcoder::dynamic_to_write_map`].
pub fn dynamic_to_write_map<M: WritableMap>(map: &DynamicMap) -> Result<M> {
    Transcoder::default().dynamic_to_write_map(map)
}

/// See [`Transcoder::drain_into_write_map`].
pub fn drain_into_write_map<M: WritableMap>(map: &mut DynamicMap) -> Result<M> {
    Transcoder::default().drain_into_write_map(map)
}

/// See [`Transcoder::json_to_write_map`].
pub fn json_to_write_map<M: WritableMap>(object: &Map<String, Value>) -> Result<M> {
    Transcoder::default().json_to_write_map(object)
}

/// See [`Transcoder::dynamic_to_json`].
pub fn dynamic_to_json(map: &DynamicMap) -> Result<Map<String, Value>> {
    Transcoder::default().dynamic_to_json(map)
}

/// See [`Transcoder::read_map_to_string_map`].
pub fn read_map_to_string_map<R: ReadableMap>(map: &R) -> Result<StringMap> {
    Transcoder::default().read_map_to_string_map(map)
}

/// See [`Transcoder::read_map_to_attributes`].
pub fn read_map_to_attributes<R: ReadableMap>(map: &R) -> Result<AttributeMap> {
    Transcoder::default().read_map_to_attributes(map)
}

/// Parse a JSON document that must be an object.
///
/// Convenience for callers holding JSON text rather than a parsed value.
pub fn parse_object(json: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Object(object) => Ok(object),
        other => Err(TranscodeError::Unsupported {
            path: "$".to_owned(),
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
