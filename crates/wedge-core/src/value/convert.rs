//! Conversion between [`DynamicValue`] and [`WireContainer`].
//!
//! # Rules (application → wire)
//!
//! | Dynamic value      | Wire field                                     |
//! |--------------------|------------------------------------------------|
//! | string / number / boolean | matching primitive field                |
//! | map                | nested container                               |
//! | null               | empty string (DataWedge has no null)           |
//! | list with any map  | container array; non-map elements are dropped  |
//! | list without maps  | string array; every element stringified        |
//!
//! The two directions are not exact inverses: a primitive list comes back as a
//! list of strings, and a null comes back as an empty string.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{DynamicValue, WireContainer, WireValue};

/// Converts a map-shaped value into a wire container.
///
/// Returns `None` (and logs) when the value is not a map; a null input is a
/// quiet `None`.  Conversion never fails part-way: any nested shape that does
/// not fit degrades to a string.
///
/// # Examples
///
/// ```rust
/// use wedge_core::value::{to_wire, WireValue};
/// use wedge_core::DynamicValue;
///
/// let value: DynamicValue = [("PROFILE_NAME", DynamicValue::from("Demo"))].into_iter().collect();
/// let container = to_wire(&value).unwrap();
/// assert_eq!(container.get_str("PROFILE_NAME"), Some("Demo"));
/// ```
pub fn to_wire(value: &DynamicValue) -> Option<WireContainer> {
    match value {
        DynamicValue::Map(map) => Some(map_to_wire(map)),
        DynamicValue::Null => None,
        other => {
            warn!(kind = other.kind(), "cannot convert a non-map value into a wire container");
            None
        }
    }
}

/// Converts a wire container back into a [`DynamicValue::Map`].
pub fn to_dynamic(container: &WireContainer) -> DynamicValue {
    DynamicValue::Map(
        container
            .iter()
            .map(|(key, value)| (key.to_string(), wire_to_dynamic(value)))
            .collect(),
    )
}

pub(crate) fn map_to_wire(map: &BTreeMap<String, DynamicValue>) -> WireContainer {
    map.iter()
        .map(|(key, value)| (key.as_str(), value_to_wire(value)))
        .collect()
}

fn value_to_wire(value: &DynamicValue) -> WireValue {
    match value {
        DynamicValue::String(s) => WireValue::String(s.clone()),
        DynamicValue::Integer(n) => WireValue::Int(*n),
        DynamicValue::Long(n) => WireValue::Long(*n),
        DynamicValue::Double(n) => WireValue::Double(*n),
        DynamicValue::Boolean(b) => WireValue::Bool(*b),
        DynamicValue::Map(map) => WireValue::Container(map_to_wire(map)),
        DynamicValue::List(items) => list_to_wire(items),
        DynamicValue::Null => WireValue::String(String::new()),
    }
}

/// Encodes a list as a homogeneous wire array.
///
/// A single map element is enough to turn the whole field into a container
/// array.  Container arrays cannot hold strings, so the stringified siblings
/// are discarded in that case.
fn list_to_wire(items: &[DynamicValue]) -> WireValue {
    let mut containers = Vec::new();
    let mut strings = Vec::new();

    for item in items {
        match item {
            DynamicValue::Map(map) => containers.push(map_to_wire(map)),
            other => strings.push(stringify(other)),
        }
    }

    if containers.is_empty() {
        WireValue::StringArray(strings)
    } else {
        if !strings.is_empty() {
            debug!(
                dropped = strings.len(),
                "dropping non-map elements from a container array"
            );
        }
        WireValue::ContainerArray(containers)
    }
}

fn stringify(value: &DynamicValue) -> String {
    match value {
        DynamicValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn wire_to_dynamic(value: &WireValue) -> DynamicValue {
    match value {
        WireValue::String(s) => DynamicValue::String(s.clone()),
        WireValue::Int(n) => DynamicValue::Integer(*n),
        WireValue::Long(n) => DynamicValue::Long(*n),
        WireValue::Double(n) => DynamicValue::Double(*n),
        WireValue::Float(n) => DynamicValue::Double(f64::from(*n)),
        WireValue::Bool(b) => DynamicValue::Boolean(*b),
        WireValue::Container(c) => to_dynamic(c),
        WireValue::ContainerArray(items) => DynamicValue::List(items.iter().map(to_dynamic).collect()),
        WireValue::StringArray(items) => {
            DynamicValue::List(items.iter().cloned().map(DynamicValue::String).collect())
        }
        WireValue::List(items) => DynamicValue::List(items.iter().map(wire_to_dynamic).collect()),
        WireValue::ByteArray(_) => DynamicValue::String(value.to_string()),
    }
}
