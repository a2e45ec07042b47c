//! JSON text bridge for wire containers.
//!
//! Two one-way paths:
//!
//! - [`wire_to_json_text`] renders a container as 2-space pretty JSON for logs.
//! - [`json_to_wire`] accepts configuration that arrives as JSON text.
//!
//! Neither is meant to reproduce an exact copy of something serialized
//! earlier; the rendering stringifies anything JSON has no shape for.

use serde_json::{Map, Number, Value};
use tracing::{error, warn};

use super::convert::map_to_wire;
use super::{ConvertError, DynamicValue, WireContainer, WireValue};

/// Parses JSON text into a wire container.
///
/// Returns `None` for empty text, malformed JSON, or JSON whose top level is
/// not an object.  Failures are logged, never propagated.
///
/// # Examples
///
/// ```rust
/// use wedge_core::value::json_to_wire;
///
/// let container = json_to_wire(r#"{"PROFILE_NAME": "Demo"}"#).unwrap();
/// assert_eq!(container.get_str("PROFILE_NAME"), Some("Demo"));
/// assert!(json_to_wire("").is_none());
/// ```
pub fn json_to_wire(text: &str) -> Option<WireContainer> {
    if text.trim().is_empty() {
        return None;
    }
    match parse_container(text) {
        Ok(container) => Some(container),
        Err(e) => {
            warn!("failed to convert JSON text to a wire container: {e}");
            None
        }
    }
}

fn parse_container(text: &str) -> Result<WireContainer, ConvertError> {
    match DynamicValue::from_json(text)? {
        DynamicValue::Map(map) => Ok(map_to_wire(&map)),
        other => Err(ConvertError::NotAMap(other.kind())),
    }
}

/// Renders a container as pretty-printed JSON (2-space indent).
///
/// Used only for diagnostics.  Byte arrays render as hex strings and list
/// elements as their string form.
pub fn wire_to_json_text(container: &WireContainer) -> String {
    match serde_json::to_string_pretty(&wire_to_json_value(container)) {
        Ok(text) => text,
        Err(e) => {
            error!("failed to render wire container as JSON: {e}");
            format!("Error converting container to JSON: {e}")
        }
    }
}

pub(crate) fn wire_to_json_value(container: &WireContainer) -> Value {
    let mut object = Map::new();
    for (key, value) in container.iter() {
        object.insert(key.to_string(), field_to_json(value));
    }
    Value::Object(object)
}

fn field_to_json(value: &WireValue) -> Value {
    match value {
        WireValue::String(s) => Value::String(s.clone()),
        WireValue::Int(n) => Value::from(*n),
        WireValue::Long(n) => Value::from(*n),
        WireValue::Double(n) => float_to_json(*n),
        WireValue::Float(n) => float_to_json(f64::from(*n)),
        WireValue::Bool(b) => Value::Bool(*b),
        WireValue::Container(c) => wire_to_json_value(c),
        WireValue::ContainerArray(items) => {
            Value::Array(items.iter().map(wire_to_json_value).collect())
        }
        WireValue::StringArray(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        WireValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    WireValue::String(s) => Value::String(s.clone()),
                    other => Value::String(other.to_string()),
                })
                .collect(),
        ),
        WireValue::ByteArray(_) => Value::String(value.to_string()),
    }
}

fn float_to_json(n: f64) -> Value {
    Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_to_wire_builds_typed_fields() {
        let container = json_to_wire(
            r#"{
                "PROFILE_NAME": "Demo",
                "COUNT": 2,
                "ENABLED": true,
                "RATIO": 0.5,
                "NOTHING": null,
                "PLUGIN_CONFIG": {"PLUGIN_NAME": "BARCODE"},
                "ACTIVITY_LIST": ["*", 1],
                "APP_LIST": [{"PACKAGE_NAME": "com.example"}]
            }"#,
        )
        .expect("valid JSON converts");

        assert_eq!(container.get_str("PROFILE_NAME"), Some("Demo"));
        assert_eq!(container.get("COUNT"), Some(&WireValue::Int(2)));
        assert_eq!(container.get("ENABLED"), Some(&WireValue::Bool(true)));
        assert_eq!(container.get("RATIO"), Some(&WireValue::Double(0.5)));
        assert_eq!(container.get_str("NOTHING"), Some(""));
        assert!(container.get_container("PLUGIN_CONFIG").is_some());
        assert_eq!(
            container.get("ACTIVITY_LIST"),
            Some(&WireValue::StringArray(vec!["*".into(), "1".into()]))
        );
        assert!(matches!(
            container.get("APP_LIST"),
            Some(WireValue::ContainerArray(items)) if items.len() == 1
        ));
    }

    #[test]
    fn test_json_to_wire_returns_none_on_bad_input() {
        assert!(json_to_wire("").is_none());
        assert!(json_to_wire("   ").is_none());
        assert!(json_to_wire("{broken").is_none());
        assert!(json_to_wire("[1, 2]").is_none());
    }

    #[test]
    fn test_wire_to_json_text_is_pretty_printed_with_two_spaces() {
        let mut container = WireContainer::new();
        container.put_string("PROFILE_NAME", "Demo");

        let text = wire_to_json_text(&container);

        assert_eq!(text, "{\n  \"PROFILE_NAME\": \"Demo\"\n}");
    }

    #[test]
    fn test_wire_to_json_text_stringifies_lists_and_bytes() {
        let container: WireContainer = [
            ("list", WireValue::List(vec![WireValue::Int(4), WireValue::String("x".into())])),
            ("raw", WireValue::ByteArray(vec![0x01, 0xab])),
        ]
        .into_iter()
        .collect();

        let value: Value = serde_json::from_str(&wire_to_json_text(&container)).unwrap();

        assert_eq!(value["list"], serde_json::json!(["4", "x"]));
        assert_eq!(value["raw"], serde_json::json!("01ab"));
    }

    #[test]
    fn test_non_finite_double_renders_as_string() {
        let container: WireContainer = [("nan", WireValue::Double(f64::NAN))].into_iter().collect();
        let value: Value = serde_json::from_str(&wire_to_json_text(&container)).unwrap();
        assert_eq!(value["nan"], serde_json::json!("NaN"));
    }
}
