//! User-defined attribute maps.
//!
//! Attributes attached to events and spans are a flat map of scalars. The
//! script side sends them as an ordinary bridge map; this conversion checks
//! the shape and types each number as narrowly as it fits.

use crate::bridge::ReadableMap;
use crate::error::Result;
use crate::trail::Trail;
use crate::transcoder::{map_slot, Slot, Transcoder};
use crate::types::{AttributeMap, AttributeValue};
use tracing::trace;

impl Transcoder {
    /// Convert a bridge read map into an [`AttributeMap`].
    ///
    /// Null, map, and array values are not valid attributes and go through
    /// the configured [`UnsupportedPolicy`](crate::UnsupportedPolicy).
    pub fn read_map_to_attributes<R: ReadableMap>(&self, map: &R) -> Result<AttributeMap> {
        trace!("bridge map -> attribute map");
        let root = Trail::root();
        self.enter(&root)?;
        let mut out = AttributeMap::new();
        for key in map.keys() {
            let at = root.key(key);
            let value = match map_slot(map, key, &at)? {
                Slot::String(s) => AttributeValue::String(s.to_owned()),
                Slot::Boolean(b) => AttributeValue::Boolean(b),
                Slot::Number(n) => AttributeValue::from_number(n),
                Slot::Null => {
                    self.unsupported(&at, "attribute value is null")?;
                    continue;
                }
                Slot::Map(_) => {
                    self.unsupported(&at, "attribute value is a map")?;
                    continue;
                }
                Slot::Array(_) => {
                    self.unsupported(&at, "attribute value is an array")?;
                    continue;
                }
            };
            out.insert(key.to_owned(), value);
        }
        Ok(out)
    }
}
