//! Builders for the commands the bridge sends.
//!
//! All builders are pure: they return a [`Command`] and leave dispatch to the
//! caller.

use tracing::{debug, warn};

use super::{keys, Command, CommandError, Delivery, ExtraParam};
use crate::catalog::decoders::{by_human_name, DECODERS};
use crate::catalog::filter_decoders_by_human_name;
use crate::value::convert::map_to_wire;
use crate::value::{DynamicValue, WireContainer, WireValue};

/// Decoders enabled when a read request names none.
pub const DEFAULT_DECODERS: &[&str] = &["QR", "Code 128", "Code 39", "EAN-13", "UPC-A", "PDF417"];

/// Value of `intent_delivery` selecting broadcast output.
const INTENT_DELIVERY_BROADCAST: &str = "2";

fn plugin_config(name: &str, params: WireContainer) -> WireContainer {
    let mut plugin = WireContainer::new();
    plugin
        .put_string("PLUGIN_NAME", name)
        .put_string("RESET_CONFIG", "true")
        .put_container("PARAM_LIST", params);
    plugin
}

fn profile_config(profile_name: &str, mode: &str) -> WireContainer {
    let mut profile = WireContainer::new();
    profile
        .put_string("PROFILE_NAME", profile_name)
        .put_string("PROFILE_ENABLED", "true")
        .put_string("CONFIG_MODE", mode);
    profile
}

/// Creates `profile_name` if it does not exist, bound to every activity of
/// `package_name`, with intent output delivering scans as broadcasts on
/// [`keys::SCAN_ACTION`].
pub fn create_profile(profile_name: &str, package_name: &str) -> Command {
    let mut intent_params = WireContainer::new();
    intent_params
        .put_string("intent_output_enabled", "true")
        .put_string("intent_action", keys::SCAN_ACTION)
        .put_string("intent_delivery", INTENT_DELIVERY_BROADCAST);

    let mut app = WireContainer::new();
    app.put_string("PACKAGE_NAME", package_name)
        .put_string_array("ACTIVITY_LIST", vec!["*".to_string()]);

    let mut profile = profile_config(profile_name, "CREATE_IF_NOT_EXIST");
    profile
        .put_container("PLUGIN_CONFIG", plugin_config("INTENT", intent_params))
        .put_container_array("APP_LIST", vec![app]);

    let command = Command::new(keys::SET_CONFIG, WireValue::Container(profile))
        .with_identifier(keys::CREATE_PROFILE_ID);
    debug!(profile = profile_name, config = %command.describe(), "built create-profile command");
    command
}

/// Builds the BARCODE plugin update for a read, followed by a scanner resume.
///
/// Every catalog decoder is written explicitly, enabled only if its human name
/// is in `decoders` (or in [`DEFAULT_DECODERS`] when `decoders` is empty).
/// `params` are applied last and override any key they collide with.
pub fn barcode_config<S: AsRef<str>>(
    profile_name: &str,
    decoders: &[S],
    params: &[ExtraParam],
) -> (Command, Command) {
    let enabled = if decoders.is_empty() {
        debug!(decoders = ?DEFAULT_DECODERS, "using default decoders");
        filter_decoders_by_human_name(DEFAULT_DECODERS)
    } else {
        for name in decoders.iter().map(AsRef::as_ref) {
            if by_human_name(name).is_none() {
                warn!(decoder = name, "ignoring unknown decoder name");
            }
        }
        filter_decoders_by_human_name(decoders)
    };

    let mut barcode_params = WireContainer::new();
    barcode_params
        .put_string("scanner_selection", "auto")
        .put_string("scanner_input_enabled", "true")
        .put_string("decode_haptic_feedback", "true");

    for decoder in DECODERS {
        let on = enabled.iter().any(|e| e.wire_key == decoder.wire_key);
        barcode_params.put_string(decoder.wire_key, if on { "true" } else { "false" });
    }

    for param in params {
        let previous = barcode_params.insert(&param.key, WireValue::String(param.value.clone()));
        if previous.is_some() {
            debug!(key = %param.key, value = %param.value, "extra param overrides default");
        }
    }

    let mut profile = profile_config(profile_name, "UPDATE");
    profile.put_container("PLUGIN_CONFIG", plugin_config("BARCODE", barcode_params));

    let update = Command::new(keys::SET_CONFIG, WireValue::Container(profile));
    debug!(
        profile = profile_name,
        enabled = enabled.len(),
        config = %update.describe(),
        "built barcode config command"
    );
    (update, resume())
}

/// Suspends the scanner input plugin.  Safe to send while already suspended.
pub fn suspend() -> Command {
    Command::new(
        keys::SCANNER_INPUT_PLUGIN,
        WireValue::String(keys::SUSPEND_PLUGIN.to_string()),
    )
}

pub fn resume() -> Command {
    Command::new(
        keys::SCANNER_INPUT_PLUGIN,
        WireValue::String(keys::RESUME_PLUGIN.to_string()),
    )
}

/// Wraps an arbitrary `key`/`payload` pair as an ordered-broadcast command.
///
/// A string payload is carried as a plain string extra and a map payload as a
/// converted container.  The two shapes are not interchangeable, so any other
/// payload is rejected rather than coerced.
pub fn generic_action(key: &str, payload: &DynamicValue) -> Result<Command, CommandError> {
    if key.is_empty() {
        return Err(CommandError::EmptyKey);
    }

    let value = match payload {
        DynamicValue::String(s) => WireValue::String(s.clone()),
        DynamicValue::Map(map) => WireValue::Container(map_to_wire(map)),
        other => {
            return Err(CommandError::UnsupportedPayload {
                key: key.to_string(),
                kind: other.kind(),
            })
        }
    };

    let command = Command::new(key, value).with_delivery(Delivery::Ordered);
    debug!(key, payload = %command.describe(), "built generic action");
    Ok(command)
}
