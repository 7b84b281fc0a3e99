//! Map conversions.
//!
//! | from              | to                | method                      |
//! |-------------------|-------------------|-----------------------------|
//! | bridge read map   | JSON object       | `read_map_to_json`          |
//! | JSON object       | generic container | `json_to_dynamic_map`       |
//! | bridge read map   | generic container | `read_map_to_dynamic`       |
//! | generic container | bridge write map  | `dynamic_to_write_map`      |
//! | JSON object       | bridge write map  | `json_to_write_map`         |
//! | generic container | JSON object       | `dynamic_to_json`           |
//! | JSON object       | string map        | `json_to_string_map`        |
//! | bridge read map   | string map        | `read_map_to_string_map`    |

use crate::bridge::{ReadableMap, WritableMap};
use crate::error::Result;
use crate::trail::Trail;
use crate::transcoder::{map_slot, MapSink, Transcoder};
use crate::types::{DynamicMap, StringMap};
use serde_json::{Map, Value};
use tracing::trace;

impl Transcoder {
    /// Convert a bridge read map into a JSON object with the same keys.
    ///
    /// Numbers become JSON floats. Fails with
    /// [`TranscodeError::NonFiniteNumber`](crate::TranscodeError::NonFiniteNumber)
    /// if any number, at any depth, is NaN or infinite.
    pub fn read_map_to_json<R: ReadableMap>(&self, map: &R) -> Result<Map<String, Value>> {
        trace!("bridge map -> JSON object");
        self.read_map_to_json_at(map, &Trail::root())
    }

    pub(crate) fn read_map_to_json_at<R: ReadableMap>(
        &self,
        map: &R,
        trail: &Trail<'_>,
    ) -> Result<Map<String, Value>> {
        self.enter(trail)?;
        let mut out = Map::new();
        for key in map.keys() {
            let at = trail.key(key);
            let value = self.slot_to_json(map_slot(map, key, &at)?, &at)?;
            out.insert(key.to_owned(), value);
        }
        Ok(out)
    }

    /// Convert a JSON object into a generic container.
    ///
    /// Nested objects and arrays are materialized as nested containers and
    /// sequences. Scalars keep their JSON typing, so `2` stays
    /// [`Dynamic::Int`](crate::Dynamic::Int) here, unlike the bridge paths.
    pub fn json_to_dynamic_map(&self, object: &Map<String, Value>) -> Result<DynamicMap> {
        trace!("JSON object -> generic container");
        self.json_to_dynamic_map_at(object, &Trail::root())
    }

    pub(crate) fn json_to_dynamic_map_at(
        &self,
        object: &Map<String, Value>,
        trail: &Trail<'_>,
    ) -> Result<DynamicMap> {
        self.enter(trail)?;
        let mut out = DynamicMap::with_capacity(object.len());
        for (key, value) in object {
            let at = trail.key(key);
            out.insert(key.clone(), self.json_to_dynamic_value(value, &at)?);
        }
        Ok(out)
    }

    /// Convert a bridge read map into a generic container. Every number
    /// arrives as [`Dynamic::Double`](crate::Dynamic::Double).
    pub fn read_map_to_dynamic<R: ReadableMap>(&self, map: &R) -> Result<DynamicMap> {
        trace!("bridge map -> generic container");
        self.read_map_to_dynamic_at(map, &Trail::root())
    }

    pub(crate) fn read_map_to_dynamic_at<R: ReadableMap>(
        &self,
        map: &R,
        trail: &Trail<'_>,
    ) -> Result<DynamicMap> {
        self.enter(trail)?;
        let mut out = DynamicMap::new();
        for key in map.keys() {
            let at = trail.key(key);
            let value = self.slot_to_dynamic(map_slot(map, key, &at)?, &at)?;
            out.insert(key.to_owned(), value);
        }
        Ok(out)
    }

    /// Build a fresh bridge write map from a generic container.
    ///
    /// The input is only read. Integers outside the 32-bit range are
    /// handled by the configured [`UnsupportedPolicy`](crate::UnsupportedPolicy).
    pub fn dynamic_to_write_map<M: WritableMap>(&self, map: &DynamicMap) -> Result<M> {
        trace!("generic container -> bridge write map");
        self.dynamic_to_write_map_at(map, &Trail::root())
    }

    /// Like [`dynamic_to_write_map`](Transcoder::dynamic_to_write_map), but
    /// takes the entries out of `map`. The container is empty on return,
    /// whether or not the conversion succeeded.
    pub fn drain_into_write_map<M: WritableMap>(&self, map: &mut DynamicMap) -> Result<M> {
        let taken = std::mem::take(map);
        self.dynamic_to_write_map(&taken)
    }

    pub(crate) fn dynamic_to_write_map_at<M: WritableMap>(
        &self,
        map: &DynamicMap,
        trail: &Trail<'_>,
    ) -> Result<M> {
        self.enter(trail)?;
        let mut out = M::default();
        for (key, value) in map {
            let at = trail.key(key);
            self.write_dynamic(MapSink { map: &mut out, key }, value, &at)?;
        }
        Ok(out)
    }

    /// Build a fresh bridge write map straight from a JSON object.
    pub fn json_to_write_map<M: WritableMap>(&self, object: &Map<String, Value>) -> Result<M> {
        trace!("JSON object -> bridge write map");
        self.json_to_write_map_at(object, &Trail::root())
    }

    pub(crate) fn json_to_write_map_at<M: WritableMap>(
        &self,
        object: &Map<String, Value>,
        trail: &Trail<'_>,
    ) -> Result<M> {
        self.enter(trail)?;
        let mut out = M::default();
        for (key, value) in object {
            let at = trail.key(key);
            self.write_json(MapSink { map: &mut out, key }, value, &at)?;
        }
        Ok(out)
    }

    /// Convert a generic container back into a JSON object.
    pub fn dynamic_to_json(&self, map: &DynamicMap) -> Result<Map<String, Value>> {
        trace!("generic container -> JSON object");
        self.dynamic_to_json_at(map, &Trail::root())
    }

    pub(crate) fn dynamic_to_json_at(
        &self,
        map: &DynamicMap,
        trail: &Trail<'_>,
    ) -> Result<Map<String, Value>> {
        self.enter(trail)?;
        let mut out = Map::new();
        for (key, value) in map {
            let at = trail.key(key);
            out.insert(key.clone(), self.dynamic_to_json_value(value, &at)?);
        }
        Ok(out)
    }

    /// Flatten a bridge read map to strings, via its JSON form.
    pub fn read_map_to_string_map<R: ReadableMap>(&self, map: &R) -> Result<StringMap> {
        let object = self.read_map_to_json(map)?;
        Ok(json_to_string_map(&object))
    }
}

/// Flatten a JSON object into a string-valued map.
///
/// Strings are taken verbatim, without quotes. Numbers, booleans, and nested
/// containers become their compact JSON text. Null becomes `None`, never
/// the text `"null"`. Type information is discarded on purpose.
///
/// # Examples
///
/// ```
/// use bridge_transcode::json_to_string_map;
/// use serde_json::json;
///
/// let object = json!({"x": "1", "y": 2, "z": null});
/// let strings = json_to_string_map(object.as_object().unwrap());
/// assert_eq!(strings["x"].as_deref(), Some("1"));
/// assert_eq!(strings["y"].as_deref(), Some("2"));
/// assert_eq!(strings["z"], None);
/// ```
pub fn json_to_string_map(object: &Map<String, Value>) -> StringMap {
    object
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            };
            (key.clone(), text)
        })
        .collect()
}
