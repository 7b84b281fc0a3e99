//! Bridge collaborator traits.
//!
//! A script runtime hands native code read-only maps and arrays whose
//! entries carry a type tag, and accepts write-only maps and arrays built
//! through typed setters. These traits describe both sides so the
//! conversions in this crate work against any bridge binding. The
//! in-memory [`BridgeMap`](crate::BridgeMap) and
//! [`BridgeArray`](crate::BridgeArray) implement all four.

use crate::error::AccessError;
use std::fmt;

/// Type tag of a single bridge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadableType {
    Null,
    Boolean,
    Number,
    String,
    Map,
    Array,
}

impl fmt::Display for ReadableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadableType::Null => "null",
            ReadableType::Boolean => "boolean",
            ReadableType::Number => "number",
            ReadableType::String => "string",
            ReadableType::Map => "map",
            ReadableType::Array => "array",
        };
        f.write_str(name)
    }
}

/// Read-only, string-keyed bridge map.
///
/// Callers read the tag with [`get_type`](ReadableMap::get_type) first and
/// then call the matching getter. A getter called against the wrong tag
/// returns [`AccessError::TypeMismatch`].
pub trait ReadableMap {
    type Map: ReadableMap;
    type Array: ReadableArray;

    fn keys(&self) -> impl Iterator<Item = &str> + '_;

    fn has_key(&self, key: &str) -> bool;

    fn get_type(&self, key: &str) -> Result<ReadableType, AccessError>;

    fn is_null(&self, key: &str) -> bool {
        matches!(self.get_type(key), Ok(ReadableType::Null))
    }

    fn get_boolean(&self, key: &str) -> Result<bool, AccessError>;

    fn get_double(&self, key: &str) -> Result<f64, AccessError>;

    /// Numbers are truncated toward zero, the way the bridge narrows a
    /// double it is asked to read as an int.
    fn get_int(&self, key: &str) -> Result<i32, AccessError>;

    fn get_string(&self, key: &str) -> Result<&str, AccessError>;

    fn get_map(&self, key: &str) -> Result<&Self::Map, AccessError>;

    fn get_array(&self, key: &str) -> Result<&Self::Array, AccessError>;
}

/// Read-only, index-addressed bridge array.
pub trait ReadableArray {
    type Map: ReadableMap;
    type Array: ReadableArray;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_type(&self, index: usize) -> Result<ReadableType, AccessError>;

    fn get_boolean(&self, index: usize) -> Result<bool, AccessError>;

    fn get_double(&self, index: usize) -> Result<f64, AccessError>;

    fn get_int(&self, index: usize) -> Result<i32, AccessError>;

    fn get_string(&self, index: usize) -> Result<&str, AccessError>;

    fn get_map(&self, index: usize) -> Result<&Self::Map, AccessError>;

    fn get_array(&self, index: usize) -> Result<&Self::Array, AccessError>;
}

/// Write-only bridge map. A fresh, empty map comes from [`Default`].
pub trait WritableMap: Default {
    type Array: WritableArray;

    fn put_null(&mut self, key: &str);

    fn put_boolean(&mut self, key: &str, value: bool);

    fn put_int(&mut self, key: &str, value: i32);

    fn put_double(&mut self, key: &str, value: f64);

    fn put_string(&mut self, key: &str, value: &str);

    fn put_map(&mut self, key: &str, value: Self);

    fn put_array(&mut self, key: &str, value: Self::Array);
}

/// Write-only bridge array. A fresh, empty array comes from [`Default`].
pub trait WritableArray: Default {
    type Map: WritableMap;

    fn push_null(&mut self);

    fn push_boolean(&mut self, value: bool);

    fn push_int(&mut self, value: i32);

    fn push_double(&mut self, value: f64);

    fn push_string(&mut self, value: &str);

    fn push_map(&mut self, value: Self::Map);

    fn push_array(&mut self, value: Self);
}
