//! Array conversions, the sequence counterparts of the map conversions.
//!
//! The map walks call into these whenever an entry is an array, and these
//! call back into the map walks for array elements that are maps.

use crate::bridge::{ReadableArray, WritableArray};
use crate::error::Result;
use crate::trail::Trail;
use crate::transcoder::{array_slot, ArraySink, Transcoder};
use crate::types::Dynamic;
use serde_json::Value;

impl Transcoder {
    /// Bridge read array → JSON array. Numbers become JSON floats.
    pub fn read_array_to_json<A: ReadableArray>(&self, array: &A) -> Result<Vec<Value>> {
        self.read_array_to_json_at(array, &Trail::root())
    }

    pub(crate) fn read_array_to_json_at<A: ReadableArray>(
        &self,
        array: &A,
        trail: &Trail<'_>,
    ) -> Result<Vec<Value>> {
        self.enter(trail)?;
        let mut out = Vec::with_capacity(array.len());
        for index in 0..array.len() {
            let at = trail.index(index);
            out.push(self.slot_to_json(array_slot(array, index, &at)?, &at)?);
        }
        Ok(out)
    }

    /// JSON array → bridge write array.
    pub fn json_array_to_write_array<A: WritableArray>(&self, items: &[Value]) -> Result<A> {
        self.json_array_to_write_array_at(items, &Trail::root())
    }

    pub(crate) fn json_array_to_write_array_at<A: WritableArray>(
        &self,
        items: &[Value],
        trail: &Trail<'_>,
    ) -> Result<A> {
        self.enter(trail)?;
        let mut out = A::default();
        for (index, item) in items.iter().enumerate() {
            let at = trail.index(index);
            self.write_json(ArraySink(&mut out), item, &at)?;
        }
        Ok(out)
    }

    /// JSON array → generic sequence, keeping JSON numeric typing.
    pub fn json_array_to_dynamic(&self, items: &[Value]) -> Result<Vec<Dynamic>> {
        self.json_array_to_dynamic_at(items, &Trail::root())
    }

    pub(crate) fn json_array_to_dynamic_at(
        &self,
        items: &[Value],
        trail: &Trail<'_>,
    ) -> Result<Vec<Dynamic>> {
        self.enter(trail)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.json_to_dynamic_value(item, &trail.index(index)))
            .collect()
    }

    /// Generic sequence → JSON array.
    pub fn dynamic_array_to_json(&self, items: &[Dynamic]) -> Result<Vec<Value>> {
        self.dynamic_array_to_json_at(items, &Trail::root())
    }

    pub(crate) fn dynamic_array_to_json_at(
        &self,
        items: &[Dynamic],
        trail: &Trail<'_>,
    ) -> Result<Vec<Value>> {
        self.enter(trail)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.dynamic_to_json_value(item, &trail.index(index)))
            .collect()
    }

    /// Bridge read array → generic sequence. Numbers become doubles.
    pub fn read_array_to_dynamic<A: ReadableArray>(&self, array: &A) -> Result<Vec<Dynamic>> {
        self.read_array_to_dynamic_at(array, &Trail::root())
    }

    pub(crate) fn read_array_to_dynamic_at<A: ReadableArray>(
        &self,
        array: &A,
        trail: &Trail<'_>,
    ) -> Result<Vec<Dynamic>> {
        self.enter(trail)?;
        let mut out = Vec::with_capacity(array.len());
        for index in 0..array.len() {
            let at = trail.index(index);
            out.push(self.slot_to_dynamic(array_slot(array, index, &at)?, &at)?);
        }
        Ok(out)
    }

    /// Generic sequence → bridge write array.
    ///
    /// Under [`UnsupportedPolicy::Skip`](crate::UnsupportedPolicy::Skip) a
    /// dropped element shifts the ones after it down by one index.
    pub fn dynamic_to_write_array<A: WritableArray>(&self, items: &[Dynamic]) -> Result<A> {
        self.dynamic_to_write_array_at(items, &Trail::root())
    }

    pub(crate) fn dynamic_to_write_array_at<A: WritableArray>(
        &self,
        items: &[Dynamic],
        trail: &Trail<'_>,
    ) -> Result<A> {
        self.enter(trail)?;
        let mut out = A::default();
        for (index, item) in items.iter().enumerate() {
            let at = trail.index(index);
            self.write_dynamic(ArraySink(&mut out), item, &at)?;
        }
        Ok(out)
    }
}
