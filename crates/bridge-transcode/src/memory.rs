//! In-memory bridge map and array.
//!
//! These back the bridge traits with plain Rust storage, playing the role
//! the framework's native-only maps play on device: building arguments in
//! tests and tools without a running script runtime. Each type is both
//! readable and writable.

use crate::bridge::{ReadableArray, ReadableMap, ReadableType, WritableArray, WritableMap};
use crate::error::AccessError;
use indexmap::IndexMap;

/// One stored bridge entry. Ints and doubles are kept apart so callers can
/// tell which setter produced them, but both read back as
/// [`ReadableType::Number`].
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Null,
    Boolean(bool),
    Int(i32),
    Double(f64),
    String(String),
    Map(BridgeMap),
    Array(BridgeArray),
}

impl Entry {
    fn readable_type(&self) -> ReadableType {
        match self {
            Entry::Null => ReadableType::Null,
            Entry::Boolean(_) => ReadableType::Boolean,
            Entry::Int(_) | Entry::Double(_) => ReadableType::Number,
            Entry::String(_) => ReadableType::String,
            Entry::Map(_) => ReadableType::Map,
            Entry::Array(_) => ReadableType::Array,
        }
    }

    fn mismatch(&self, expected: ReadableType) -> AccessError {
        AccessError::TypeMismatch {
            expected,
            found: self.readable_type(),
        }
    }

    fn boolean(&self) -> Result<bool, AccessError> {
        match self {
            Entry::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(ReadableType::Boolean)),
        }
    }

    fn double(&self) -> Result<f64, AccessError> {
        match self {
            Entry::Int(i) => Ok(f64::from(*i)),
            Entry::Double(d) => Ok(*d),
            other => Err(other.mismatch(ReadableType::Number)),
        }
    }

    fn int(&self) -> Result<i32, AccessError> {
        match self {
            Entry::Int(i) => Ok(*i),
            // Saturating float-to-int cast, NaN becomes 0.
            Entry::Double(d) => Ok(*d as i32),
            other => Err(other.mismatch(ReadableType::Number)),
        }
    }

    fn string(&self) -> Result<&str, AccessError> {
        match self {
            Entry::String(s) => Ok(s),
            other => Err(other.mismatch(ReadableType::String)),
        }
    }

    fn map(&self) -> Result<&BridgeMap, AccessError> {
        match self {
            Entry::Map(m) => Ok(m),
            other => Err(other.mismatch(ReadableType::Map)),
        }
    }

    fn array(&self) -> Result<&BridgeArray, AccessError> {
        match self {
            Entry::Array(a) => Ok(a),
            other => Err(other.mismatch(ReadableType::Array)),
        }
    }
}

/// Insertion-ordered bridge map held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeMap {
    entries: IndexMap<String, Entry>,
}

impl BridgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the entry under `key` was written with `put_int`.
    pub fn is_int(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(Entry::Int(_)))
    }

    fn entry(&self, key: &str) -> Result<&Entry, AccessError> {
        self.entries.get(key).ok_or(AccessError::MissingKey)
    }

    fn insert(&mut self, key: &str, entry: Entry) {
        self.entries.insert(key.to_owned(), entry);
    }
}

impl ReadableMap for BridgeMap {
    type Map = BridgeMap;
    type Array = BridgeArray;

    fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get_type(&self, key: &str) -> Result<ReadableType, AccessError> {
        self.entry(key).map(Entry::readable_type)
    }

    fn get_boolean(&self, key: &str) -> Result<bool, AccessError> {
        self.entry(key)?.boolean()
    }

    fn get_double(&self, key: &str) -> Result<f64, AccessError> {
        self.entry(key)?.double()
    }

    fn get_int(&self, key: &str) -> Result<i32, AccessError> {
        self.entry(key)?.int()
    }

    fn get_string(&self, key: &str) -> Result<&str, AccessError> {
        self.entry(key)?.string()
    }

    fn get_map(&self, key: &str) -> Result<&BridgeMap, AccessError> {
        self.entry(key)?.map()
    }

    fn get_array(&self, key: &str) -> Result<&BridgeArray, AccessError> {
        self.entry(key)?.array()
    }
}

impl WritableMap for BridgeMap {
    type Array = BridgeArray;

    fn put_null(&mut self, key: &str) {
        self.insert(key, Entry::Null);
    }

    fn put_boolean(&mut self, key: &str, value: bool) {
        self.insert(key, Entry::Boolean(value));
    }

    fn put_int(&mut self, key: &str, value: i32) {
        self.insert(key, Entry::Int(value));
    }

    fn put_double(&mut self, key: &str, value: f64) {
        self.insert(key, Entry::Double(value));
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.insert(key, Entry::String(value.to_owned()));
    }

    fn put_map(&mut self, key: &str, value: BridgeMap) {
        self.insert(key, Entry::Map(value));
    }

    fn put_array(&mut self, key: &str, value: BridgeArray) {
        self.insert(key, Entry::Array(value));
    }
}

/// Bridge array held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeArray {
    items: Vec<Entry>,
}

impl BridgeArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the item at `index` was written with `push_int`.
    pub fn is_int(&self, index: usize) -> bool {
        matches!(self.items.get(index), Some(Entry::Int(_)))
    }

    fn item(&self, index: usize) -> Result<&Entry, AccessError> {
        self.items.get(index).ok_or(AccessError::OutOfBounds {
            index,
            len: self.items.len(),
        })
    }
}

impl ReadableArray for BridgeArray {
    type Map = BridgeMap;
    type Array = BridgeArray;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get_type(&self, index: usize) -> Result<ReadableType, AccessError> {
        self.item(index).map(Entry::readable_type)
    }

    fn get_boolean(&self, index: usize) -> Result<bool, AccessError> {
        self.item(index)?.boolean()
    }

    fn get_double(&self, index: usize) -> Result<f64, AccessError> {
        self.item(index)?.double()
    }

    fn get_int(&self, index: usize) -> Result<i32, AccessError> {
        self.item(index)?.int()
    }

    fn get_string(&self, index: usize) -> Result<&str, AccessError> {
        self.item(index)?.string()
    }

    fn get_map(&self, index: usize) -> Result<&BridgeMap, AccessError> {
        self.item(index)?.map()
    }

    fn get_array(&self, index: usize) -> Result<&BridgeArray, AccessError> {
        self.item(index)?.array()
    }
}

impl WritableArray for BridgeArray {
    type Map = BridgeMap;

    fn push_null(&mut self) {
        self.items.push(Entry::Null);
    }

    fn push_boolean(&mut self, value: bool) {
        self.items.push(Entry::Boolean(value));
    }

    fn push_int(&mut self, value: i32) {
        self.items.push(Entry::Int(value));
    }

    fn push_double(&mut self, value: f64) {
        self.items.push(Entry::Double(value));
    }

    fn push_string(&mut self, value: &str) {
        self.items.push(Entry::String(value.to_owned()));
    }

    fn push_map(&mut self, value: BridgeMap) {
        self.items.push(Entry::Map(value));
    }

    fn push_array(&mut self, value: BridgeArray) {
        self.items.push(Entry::Array(value));
    }
}
