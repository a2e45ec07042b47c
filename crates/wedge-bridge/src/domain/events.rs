//! Events republished to the application.
//!
//! Every inbound broadcast becomes a [`BroadcastEvent`]; a broadcast on the
//! scan action additionally becomes a [`ScanEvent`].  Listeners receive both
//! wrapped in [`BridgeEvent`], in that order.

use std::collections::BTreeMap;

use serde::Serialize;
use wedge_core::catalog::{label_description, label_human_name};
use wedge_core::command::keys;
use wedge_core::value::to_dynamic;
use wedge_core::{DynamicValue, WireContainer, WireValue};

/// Event name for generic broadcasts.
pub const BROADCAST_EVENT: &str = "onBroadcastReceiver";
/// Event name for decoded barcodes.
pub const SCAN_EVENT: &str = "onBarcode";

/// The extras of an inbound broadcast, minus the ones listeners cannot carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BroadcastEvent {
    #[serde(skip)]
    pub action: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, DynamicValue>,
}

impl BroadcastEvent {
    /// Builds the event from raw extras.
    ///
    /// Byte-array and list extras are dropped for good.  Listeners only accept
    /// the value model of [`DynamicValue`] maps and neither shape survives it.
    pub fn from_extras(action: &str, extras: &WireContainer) -> Self {
        let mut kept = extras.clone();
        kept.retain(|_, value| !matches!(value, WireValue::ByteArray(_) | WireValue::List(_)));

        let fields = match to_dynamic(&kept) {
            DynamicValue::Map(map) => map,
            _ => BTreeMap::new(),
        };
        Self {
            action: action.to_string(),
            fields,
        }
    }
}

/// A decoded barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEvent {
    pub data: String,
    /// Human symbology name, or the raw label-type code if it is not in the
    /// catalog.  A broadcast without a label type reports `"Unknown"`.
    #[serde(rename = "type")]
    pub label_type: String,
}

impl ScanEvent {
    pub fn from_extras(extras: &WireContainer) -> Self {
        let data = extras.get_str(keys::EXTRA_DATA_STRING).unwrap_or_default();
        let label_type = match extras.get_str(keys::EXTRA_LABEL_TYPE) {
            Some(code) => label_human_name(code),
            None => label_description(None),
        };
        Self {
            data: data.to_string(),
            label_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    Broadcast(BroadcastEvent),
    Scan(ScanEvent),
}

impl BridgeEvent {
    /// Name the host emits this event under.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeEvent::Broadcast(_) => BROADCAST_EVENT,
            BridgeEvent::Scan(_) => SCAN_EVENT,
        }
    }

    /// The event payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the payload cannot be represented.
    pub fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            BridgeEvent::Broadcast(event) => serde_json::to_value(event),
            BridgeEvent::Scan(event) => serde_json::to_value(event),
        }
    }
}
