//! Integration tests for wedge-core.
//!
//! These drive the public API the way the bridge does: parse a read request,
//! build the command pair, and inspect the resulting containers.

use wedge_core::catalog::{self, Category, DECODERS};
use wedge_core::command::{self, keys};
use wedge_core::value::{json_to_wire, to_dynamic, to_wire, wire_to_json_text};
use wedge_core::{DynamicValue, ReadRequest, WireValue};

fn param_list(command: &wedge_core::Command) -> &wedge_core::WireContainer {
    command
        .extras
        .get_container(keys::SET_CONFIG)
        .and_then(|p| p.get_container("PLUGIN_CONFIG"))
        .and_then(|p| p.get_container("PARAM_LIST"))
        .expect("barcode command must carry a parameter list")
}

#[test]
fn test_read_request_flows_into_barcode_command() {
    let config = DynamicValue::from_json(
        r#"{"types": ["QR", "Aztec"],
            "params": [{"key": "decoder_aztec", "value": "false"},
                       {"key": "picklist", "value": "2"}]}"#,
    )
    .expect("valid JSON");
    let request = ReadRequest::from_dynamic(&config);

    let (update, resume) = command::barcode_config("WedgeApp", &request.decoders, &request.params);
    let params = param_list(&update);

    assert_eq!(params.get_str("decoder_qrcode"), Some("true"));
    assert_eq!(params.get_str("decoder_aztec"), Some("false"));
    assert_eq!(params.get_str("decoder_ean13"), Some("false"));
    assert_eq!(params.get_str("picklist"), Some("2"));
    assert_eq!(
        resume.payload(keys::SCANNER_INPUT_PLUGIN),
        Some(&WireValue::String(keys::RESUME_PLUGIN.to_string()))
    );
}

#[test]
fn test_every_catalog_decoder_is_written_exactly_once() {
    let (update, _) = command::barcode_config("p", &["Codabar"], &[]);
    let params = param_list(&update);

    let decoder_fields = params.keys().filter(|k| k.starts_with("decoder_")).count();
    assert_eq!(decoder_fields, DECODERS.len());
}

#[test]
fn test_wire_round_trip_preserves_primitives_and_maps() {
    let value = DynamicValue::from_json(
        r#"{"name": "p", "n": 3, "on": true, "nested": {"x": 1.5}}"#,
    )
    .unwrap();

    let wire = to_wire(&value).unwrap();
    assert_eq!(to_dynamic(&wire), value);
}

#[test]
fn test_primitive_list_comes_back_as_strings() {
    let value = DynamicValue::from_json(r#"{"l": [1, true, null]}"#).unwrap();
    let back = to_dynamic(&to_wire(&value).unwrap());

    assert_eq!(
        back.get("l"),
        Some(&DynamicValue::List(vec![
            "1".into(),
            "true".into(),
            "".into()
        ]))
    );
}

#[test]
fn test_json_text_paths() {
    assert!(json_to_wire("not json").is_none());
    assert!(json_to_wire("[1, 2]").is_none());

    let wire = json_to_wire(r#"{"a": {"b": "c"}}"#).unwrap();
    let text = wire_to_json_text(&wire);
    assert_eq!(text, "{\n  \"a\": {\n    \"b\": \"c\"\n  }\n}");
}

#[test]
fn test_label_normalization() {
    assert_eq!(catalog::label_human_name("LABEL-TYPE-EAN13"), "EAN-13");
    assert_eq!(catalog::label_human_name("LABEL-TYPE-FUTURE"), "LABEL-TYPE-FUTURE");
    assert_eq!(catalog::category("LABEL-TYPE-QRCODE"), Category::TwoD);
    assert_eq!(catalog::category("LABEL-TYPE-FUTURE"), Category::Unknown);
}
