//! The transcoder and the per-value conversions its map and array walks share.
//!
//! Map and array traversals differ only in how they address an entry (key
//! or index). Reading an entry produces a [`Slot`]; writing one goes
//! through a [`Sink`]. Each source representation then needs exactly one
//! exhaustive `match` to convert a value, wherever it sits.

use crate::bridge::{ReadableArray, ReadableMap, ReadableType, WritableArray, WritableMap};
use crate::error::{AccessError, Result, TranscodeError};
use crate::options::{TranscodeOptions, UnsupportedPolicy};
use crate::trail::Trail;
use crate::types::Dynamic;
use serde_json::{Number, Value};
use tracing::debug;

/// Structural converter between bridge maps, JSON objects, and generic
/// containers.
///
/// Holds only its [`TranscodeOptions`]; every conversion allocates a fresh
/// output and leaves its input untouched, with the single exception of
/// [`drain_into_write_map`](Transcoder::drain_into_write_map).
///
/// # Examples
///
/// ```
/// use bridge_transcode::{BridgeMap, Transcoder, WritableMap};
/// use serde_json::json;
///
/// let mut map = BridgeMap::new();
/// map.put_boolean("a", true);
/// map.put_null("d");
///
/// let json = Transcoder::default().read_map_to_json(&map).unwrap();
/// assert_eq!(serde_json::Value::Object(json), json!({"a": true, "d": null}));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transcoder {
    options: TranscodeOptions,
}

impl Transcoder {
    pub fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TranscodeOptions {
        &self.options
    }

    /// Guard run on entry to every container.
    pub(crate) fn enter(&self, trail: &Trail<'_>) -> Result<()> {
        if trail.depth() >= self.options.max_depth {
            return Err(TranscodeError::DepthLimit {
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    /// Apply the unsupported-value policy. `Ok(())` means the caller drops
    /// the value and moves on.
    pub(crate) fn unsupported(&self, at: &Trail<'_>, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        match self.options.on_unsupported {
            UnsupportedPolicy::Reject => Err(TranscodeError::Unsupported {
                path: at.to_string(),
                reason,
            }),
            UnsupportedPolicy::Skip => {
                debug!(path = %at, %reason, "skipping unsupported value");
                Ok(())
            }
        }
    }

    pub(crate) fn slot_to_json<M: ReadableMap, A: ReadableArray>(
        &self,
        slot: Slot<'_, M, A>,
        at: &Trail<'_>,
    ) -> Result<Value> {
        Ok(match slot {
            Slot::Null => Value::Null,
            Slot::Boolean(b) => Value::Bool(b),
            Slot::Number(n) => Value::Number(finite_number(n, at)?),
            Slot::String(s) => Value::String(s.to_owned()),
            Slot::Map(map) => Value::Object(self.read_map_to_json_at(map, at)?),
            Slot::Array(array) => Value::Array(self.read_array_to_json_at(array, at)?),
        })
    }

    /// Bridge numbers always land as [`Dynamic::Double`].
    pub(crate) fn slot_to_dynamic<M: ReadableMap, A: ReadableArray>(
        &self,
        slot: Slot<'_, M, A>,
        at: &Trail<'_>,
    ) -> Result<Dynamic> {
        Ok(match slot {
            Slot::Null => Dynamic::Null,
            Slot::Boolean(b) => Dynamic::Bool(b),
            Slot::Number(n) => Dynamic::Double(n),
            Slot::String(s) => Dynamic::String(s.to_owned()),
            Slot::Map(map) => Dynamic::Map(self.read_map_to_dynamic_at(map, at)?),
            Slot::Array(array) => Dynamic::Array(self.read_array_to_dynamic_at(array, at)?),
        })
    }

    /// JSON scalars keep their native typing: integers that fit `i64` stay
    /// [`Dynamic::Int`], everything else numeric becomes [`Dynamic::Double`].
    pub(crate) fn json_to_dynamic_value(&self, value: &Value, at: &Trail<'_>) -> Result<Dynamic> {
        Ok(match value {
            Value::Null => Dynamic::Null,
            Value::Bool(b) => Dynamic::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Dynamic::Int(i),
                None => Dynamic::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Dynamic::String(s.clone()),
            Value::Array(items) => Dynamic::Array(self.json_array_to_dynamic_at(items, at)?),
            Value::Object(object) => Dynamic::Map(self.json_to_dynamic_map_at(object, at)?),
        })
    }

    pub(crate) fn dynamic_to_json_value(&self, value: &Dynamic, at: &Trail<'_>) -> Result<Value> {
        Ok(match value {
            Dynamic::Null => Value::Null,
            Dynamic::Bool(b) => Value::Bool(*b),
            Dynamic::Int(i) => Value::Number(Number::from(*i)),
            Dynamic::Double(d) => Value::Number(finite_number(*d, at)?),
            Dynamic::String(s) => Value::String(s.clone()),
            Dynamic::Map(map) => Value::Object(self.dynamic_to_json_at(map, at)?),
            Dynamic::Array(items) => Value::Array(self.dynamic_array_to_json_at(items, at)?),
        })
    }

    /// A bridge int is 32 bits wide; a [`Dynamic::Int`] outside that range
    /// has no bridge form and falls to the unsupported-value policy.
    pub(crate) fn write_dynamic<S: Sink>(
        &self,
        sink: S,
        value: &Dynamic,
        at: &Trail<'_>,
    ) -> Result<()> {
        match value {
            Dynamic::Null => sink.null(),
            Dynamic::Bool(b) => sink.boolean(*b),
            Dynamic::Double(d) => sink.double(*d),
            Dynamic::Int(i) => match i32::try_from(*i) {
                Ok(int) => sink.int(int),
                Err(_) => {
                    return self.unsupported(
                        at,
                        format!("integer {i} does not fit in a 32-bit bridge int"),
                    )
                }
            },
            Dynamic::String(s) => sink.string(s),
            Dynamic::Map(map) => sink.map(self.dynamic_to_write_map_at(map, at)?),
            Dynamic::Array(items) => sink.array(self.dynamic_to_write_array_at(items, at)?),
        }
        Ok(())
    }

    /// JSON integers that fit 32 bits go through `int`; every other number
    /// is written as a double, which is how the script side sees it anyway.
    pub(crate) fn write_json<S: Sink>(&self, sink: S, value: &Value, at: &Trail<'_>) -> Result<()> {
        match value {
            Value::Null => sink.null(),
            Value::Bool(b) => sink.boolean(*b),
            Value::Number(n) => match n.as_i64().and_then(|i| i32::try_from(i).ok()) {
                Some(int) => sink.int(int),
                None => match n.as_f64() {
                    Some(double) => sink.double(double),
                    None => return self.unsupported(at, format!("number {n} has no f64 form")),
                },
            },
            Value::String(s) => sink.string(s),
            Value::Array(items) => sink.array(self.json_array_to_write_array_at(items, at)?),
            Value::Object(object) => sink.map(self.json_to_write_map_at(object, at)?),
        }
        Ok(())
    }
}

/// One bridge entry, read according to its type tag.
pub(crate) enum Slot<'a, M, A> {
    Null,
    Boolean(bool),
    Number(f64),
    String(&'a str),
    Map(&'a M),
    Array(&'a A),
}

fn access_error(at: &Trail<'_>, source: AccessError) -> TranscodeError {
    TranscodeError::Access {
        path: at.to_string(),
        source,
    }
}

pub(crate) fn map_slot<'a, R: ReadableMap>(
    map: &'a R,
    key: &str,
    at: &Trail<'_>,
) -> Result<Slot<'a, R::Map, R::Array>> {
    let access = |source| access_error(at, source);
    Ok(match map.get_type(key).map_err(access)? {
        ReadableType::Null => Slot::Null,
        ReadableType::Boolean => Slot::Boolean(map.get_boolean(key).map_err(access)?),
        ReadableType::Number => Slot::Number(map.get_double(key).map_err(access)?),
        ReadableType::String => Slot::String(map.get_string(key).map_err(access)?),
        ReadableType::Map => Slot::Map(map.get_map(key).map_err(access)?),
        ReadableType::Array => Slot::Array(map.get_array(key).map_err(access)?),
    })
}

pub(crate) fn array_slot<'a, A: ReadableArray>(
    array: &'a A,
    index: usize,
    at: &Trail<'_>,
) -> Result<Slot<'a, A::Map, A::Array>> {
    let access = |source| access_error(at, source);
    Ok(match array.get_type(index).map_err(access)? {
        ReadableType::Null => Slot::Null,
        ReadableType::Boolean => Slot::Boolean(array.get_boolean(index).map_err(access)?),
        ReadableType::Number => Slot::Number(array.get_double(index).map_err(access)?),
        ReadableType::String => Slot::String(array.get_string(index).map_err(access)?),
        ReadableType::Map => Slot::Map(array.get_map(index).map_err(access)?),
        ReadableType::Array => Slot::Array(array.get_array(index).map_err(access)?),
    })
}

fn finite_number(n: f64, at: &Trail<'_>) -> Result<Number> {
    Number::from_f64(n).ok_or_else(|| TranscodeError::NonFiniteNumber {
        path: at.to_string(),
    })
}

/// Destination for exactly one written value.
pub(crate) trait Sink {
    type Map: WritableMap;
    type Array: WritableArray;

    fn null(self);
    fn boolean(self, value: bool);
    fn int(self, value: i32);
    fn double(self, value: f64);
    fn string(self, value: &str);
    fn map(self, value: Self::Map);
    fn array(self, value: Self::Array);
}

/// Writes under one key of a bridge map.
pub(crate) struct MapSink<'a, M> {
    pub(crate) map: &'a mut M,
    pub(crate) key: &'a str,
}

impl<M: WritableMap> Sink for MapSink<'_, M> {
    type Map = M;
    type Array = M::Array;

    fn null(self) {
        self.map.put_null(self.key);
    }

    fn boolean(self, value: bool) {
        self.map.put_boolean(self.key, value);
    }

    fn int(self, value: i32) {
        self.map.put_int(self.key, value);
    }

    fn double(self, value: f64) {
        self.map.put_double(self.key, value);
    }

    fn string(self, value: &str) {
        self.map.put_string(self.key, value);
    }

    fn map(self, value: M) {
        self.map.put_map(self.key, value);
    }

    fn array(self, value: M::Array) {
        self.map.put_array(self.key, value);
    }
}

/// Appends to the end of a bridge array.
pub(crate) struct ArraySink<'a, A>(pub(crate) &'a mut A);

impl<A: WritableArray> Sink for ArraySink<'_, A> {
    type Map = A::Map;
    type Array = A;

    fn null(self) {
        self.0.push_null();
    }

    fn boolean(self, value: bool) {
        self.0.push_boolean(value);
    }

    fn int(self, value: i32) {
        self.0.push_int(value);
    }

    fn double(self, value: f64) {
        self.0.push_double(value);
    }

    fn string(self, value: &str) {
        self.0.push_string(value);
    }

    fn map(self, value: A::Map) {
        self.0.push_map(value);
    }

    fn array(self, value: A) {
        self.0.push_array(value);
    }
}
