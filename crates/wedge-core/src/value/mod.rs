//! Value model: the application's dynamic values and DataWedge's wire container.
//!
//! The embedding application hands over loosely typed configuration (maps,
//! lists, primitives).  DataWedge only accepts a container of typed fields in
//! which arrays are either all containers or all strings.  [`DynamicValue`]
//! models the former, [`WireContainer`] the latter, and [`convert`] moves
//! between the two.

pub mod convert;
pub mod json;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use convert::{to_dynamic, to_wire};
pub use json::{json_to_wire, wire_to_json_text};

/// Errors raised while converting values.
///
/// The public conversion functions never return these to the caller; they log
/// them and return `None` instead, so a bad configuration push cannot take the
/// host down.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The JSON text could not be parsed.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The value at the top level is not a map and cannot become a container.
    #[error("expected a map at the top level, got {0}")]
    NotAMap(&'static str),
}

// ── DynamicValue ──────────────────────────────────────────────────────────────

/// A loosely typed value as produced by the embedding application or parsed
/// from JSON text.
///
/// Two values are equal when they are structurally equal; there is no identity.
///
/// # Serde representation
///
/// The enum is untagged, so it reads and writes plain JSON:
///
/// ```rust
/// use wedge_core::DynamicValue;
///
/// let value = DynamicValue::from_json(r#"{"enabled": true, "count": 3}"#).unwrap();
/// assert_eq!(value.get("count"), Some(&DynamicValue::Integer(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicValue {
    // Variant order matters for untagged deserialization: narrower numbers
    // must be tried before wider ones.
    Null,
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
    List(Vec<DynamicValue>),
    Map(BTreeMap<String, DynamicValue>),
}

impl DynamicValue {
    /// Parses JSON text into a value.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Json`] if the text is not valid JSON.
    pub fn from_json(text: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Short name of the variant, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DynamicValue::Null => "null",
            DynamicValue::Boolean(_) => "boolean",
            DynamicValue::Integer(_) => "integer",
            DynamicValue::Long(_) => "long",
            DynamicValue::Double(_) => "double",
            DynamicValue::String(_) => "string",
            DynamicValue::List(_) => "list",
            DynamicValue::Map(_) => "map",
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, DynamicValue::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, DynamicValue>> {
        match self {
            DynamicValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a map.
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl fmt::Display for DynamicValue {
    /// Writes the string representation used when a value has to be
    /// stringified (primitive arrays, generic fallback).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::Null => f.write_str("null"),
            DynamicValue::Boolean(b) => write!(f, "{b}"),
            DynamicValue::Integer(n) => write!(f, "{n}"),
            DynamicValue::Long(n) => write!(f, "{n}"),
            // Debug keeps the fractional part on whole numbers ("5.0").
            DynamicValue::Double(n) => write!(f, "{n:?}"),
            DynamicValue::String(s) => f.write_str(s),
            DynamicValue::List(_) | DynamicValue::Map(_) => {
                let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        DynamicValue::String(value.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        DynamicValue::String(value)
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        DynamicValue::Boolean(value)
    }
}

impl From<i32> for DynamicValue {
    fn from(value: i32) -> Self {
        DynamicValue::Integer(value)
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        DynamicValue::Long(value)
    }
}

impl From<f64> for DynamicValue {
    fn from(value: f64) -> Self {
        DynamicValue::Double(value)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(value: Vec<DynamicValue>) -> Self {
        DynamicValue::List(value)
    }
}

impl<K: Into<String>> FromIterator<(K, DynamicValue)> for DynamicValue {
    /// Collects key/value pairs into a [`DynamicValue::Map`].
    fn from_iter<I: IntoIterator<Item = (K, DynamicValue)>>(iter: I) -> Self {
        DynamicValue::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ── WireValue / WireContainer ─────────────────────────────────────────────────

/// A single typed field inside a [`WireContainer`].
///
/// `ContainerArray` and `StringArray` are the only array shapes DataWedge
/// accepts in a command.  `ByteArray` and `List` only ever arrive on inbound
/// broadcasts.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    String(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Bool(bool),
    Container(WireContainer),
    ContainerArray(Vec<WireContainer>),
    StringArray(Vec<String>),
    ByteArray(Vec<u8>),
    List(Vec<WireValue>),
}

impl WireValue {
    /// Short name of the variant, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::String(_) => "string",
            WireValue::Int(_) => "int",
            WireValue::Long(_) => "long",
            WireValue::Double(_) => "double",
            WireValue::Float(_) => "float",
            WireValue::Bool(_) => "bool",
            WireValue::Container(_) => "container",
            WireValue::ContainerArray(_) => "container-array",
            WireValue::StringArray(_) => "string-array",
            WireValue::ByteArray(_) => "byte-array",
            WireValue::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&WireContainer> {
        match self {
            WireValue::Container(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::String(s) => f.write_str(s),
            WireValue::Int(n) => write!(f, "{n}"),
            WireValue::Long(n) => write!(f, "{n}"),
            WireValue::Double(n) => write!(f, "{n:?}"),
            WireValue::Float(n) => write!(f, "{n:?}"),
            WireValue::Bool(b) => write!(f, "{b}"),
            WireValue::Container(c) => f.write_str(&json::wire_to_json_value(c).to_string()),
            WireValue::ContainerArray(items) => {
                let values = items.iter().map(json::wire_to_json_value).collect::<Vec<_>>();
                f.write_str(&serde_json::Value::Array(values).to_string())
            }
            WireValue::StringArray(items) => write!(f, "[{}]", items.join(", ")),
            WireValue::ByteArray(bytes) => {
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            WireValue::List(items) => {
                let parts = items.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// The key/value container DataWedge expects as a command payload, and the
/// shape of the extras it sends back.
///
/// Keys are kept sorted so diagnostic output is stable.  Inserting an existing
/// key replaces the previous value (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireContainer {
    entries: BTreeMap<String, WireValue>,
}

impl WireContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: WireValue) -> Option<WireValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert(key, WireValue::String(value.into()));
        self
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.insert(key, WireValue::Bool(value));
        self
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i32) -> &mut Self {
        self.insert(key, WireValue::Int(value));
        self
    }

    pub fn put_container(&mut self, key: impl Into<String>, value: WireContainer) -> &mut Self {
        self.insert(key, WireValue::Container(value));
        self
    }

    pub fn put_container_array(
        &mut self,
        key: impl Into<String>,
        value: Vec<WireContainer>,
    ) -> &mut Self {
        self.insert(key, WireValue::ContainerArray(value));
        self
    }

    pub fn put_string_array(&mut self, key: impl Into<String>, value: Vec<String>) -> &mut Self {
        self.insert(key, WireValue::StringArray(value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.entries.get(key)
    }

    /// Returns the field under `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(WireValue::as_str)
    }

    /// Returns the field under `key` if it is a nested container.
    pub fn get_container(&self, key: &str) -> Option<&WireContainer> {
        self.get(key).and_then(WireValue::as_container)
    }

    pub fn remove(&mut self, key: &str) -> Option<WireValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keeps only the fields for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&str, &WireValue) -> bool) {
        self.entries.retain(|k, v| f(k, v));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, WireValue)> for WireContainer {
    fn from_iter<I: IntoIterator<Item = (K, WireValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
