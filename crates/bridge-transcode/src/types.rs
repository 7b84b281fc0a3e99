//! Value types shared by the conversions.

use indexmap::IndexMap;
use serde::Serialize;

/// Generic key/value container, the neutral intermediate representation.
pub type DynamicMap = IndexMap<String, Dynamic>;

/// String-valued container. `None` marks a key whose source value was null.
pub type StringMap = IndexMap<String, Option<String>>;

/// Flat map of user-defined attribute values.
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// A value held in a generic container.
///
/// Integers and doubles are separate variants: values read from JSON keep
/// whichever one the JSON text used, while values read from a bridge map
/// always arrive as [`Dynamic::Double`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dynamic {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Map(DynamicMap),
    Array(Vec<Dynamic>),
}

impl Dynamic {
    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn as_map(&self) -> Option<&DynamicMap> {
        match self {
            Dynamic::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric value as `f64`, for either numeric variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Dynamic::Int(i) => Some(*i as f64),
            Dynamic::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<bool> for Dynamic {
    fn from(value: bool) -> Self {
        Dynamic::Bool(value)
    }
}

impl From<i32> for Dynamic {
    fn from(value: i32) -> Self {
        Dynamic::Int(i64::from(value))
    }
}

impl From<i64> for Dynamic {
    fn from(value: i64) -> Self {
        Dynamic::Int(value)
    }
}

impl From<f64> for Dynamic {
    fn from(value: f64) -> Self {
        Dynamic::Double(value)
    }
}

impl From<&str> for Dynamic {
    fn from(value: &str) -> Self {
        Dynamic::String(value.to_owned())
    }
}

impl From<String> for Dynamic {
    fn from(value: String) -> Self {
        Dynamic::String(value)
    }
}

impl From<DynamicMap> for Dynamic {
    fn from(value: DynamicMap) -> Self {
        Dynamic::Map(value)
    }
}

impl From<Vec<Dynamic>> for Dynamic {
    fn from(value: Vec<Dynamic>) -> Self {
        Dynamic::Array(value)
    }
}

impl<T: Into<Dynamic>> From<Option<T>> for Dynamic {
    fn from(value: Option<T>) -> Self {
        value.map_or(Dynamic::Null, Into::into)
    }
}

/// A user-defined attribute value. Only scalars are allowed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
}

impl AttributeValue {
    /// Pick the narrowest numeric variant that holds `n` exactly.
    pub fn from_number(n: f64) -> Self {
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
        const LONG_MIN: f64 = i64::MIN as f64;
        const LONG_MAX: f64 = i64::MAX as f64;

        if !n.is_finite() || n.fract() != 0.0 {
            AttributeValue::Double(n)
        } else if n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
            AttributeValue::Int(n as i32)
        } else if (LONG_MIN..LONG_MAX).contains(&n) {
            AttributeValue::Long(n as i64)
        } else {
            AttributeValue::Double(n)
        }
    }
}
