//! DataWedge command payloads.
//!
//! A command is a one-way broadcast addressed to [`keys::API_ACTION`].  Its
//! extras carry exactly one API key (for example [`keys::SET_CONFIG`]) plus the
//! control field [`keys::SEND_RESULT`] and, optionally,
//! [`keys::COMMAND_IDENTIFIER`].  There is no reply to wait for: whether
//! DataWedge applied the command is only ever visible as a later result
//! broadcast, which the event bridge republishes like any other.

pub mod builder;
pub mod request;

use thiserror::Error;

use crate::value::{wire_to_json_text, WireContainer, WireValue};

pub use builder::{
    barcode_config, create_profile, generic_action, resume, suspend, DEFAULT_DECODERS,
};
pub use request::{ExtraParam, ReadRequest};

/// Action strings, extra keys and fixed values of the DataWedge intent API.
pub mod keys {
    /// Action every command is addressed to.
    pub const API_ACTION: &str = "com.symbol.datawedge.api.ACTION";
    /// Action DataWedge uses for command results.
    pub const RESULT_ACTION: &str = "com.symbol.datawedge.api.RESULT_ACTION";
    /// Action profiles created here use for scan output.
    pub const SCAN_ACTION: &str = "com.symbol.datawedge.data_scan";
    /// Category both inbound actions are filtered by.
    pub const DEFAULT_CATEGORY: &str = "android.intent.category.DEFAULT";

    pub const SET_CONFIG: &str = "com.symbol.datawedge.api.SET_CONFIG";
    pub const SCANNER_INPUT_PLUGIN: &str = "com.symbol.datawedge.api.SCANNER_INPUT_PLUGIN";
    pub const SEND_RESULT: &str = "SEND_RESULT";
    pub const COMMAND_IDENTIFIER: &str = "COMMAND_IDENTIFIER";

    pub const EXTRA_DATA_STRING: &str = "com.symbol.datawedge.data_string";
    pub const EXTRA_LABEL_TYPE: &str = "com.symbol.datawedge.label_type";
    pub const EXTRA_SOURCE: &str = "com.symbol.datawedge.source";

    pub const RESUME_PLUGIN: &str = "RESUME_PLUGIN";
    pub const SUSPEND_PLUGIN: &str = "SUSPEND_PLUGIN";
    pub const CREATE_PROFILE_ID: &str = "CREATE_PROFILE";
}

/// Errors raised while building a command from caller-supplied input.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    /// A generic action was requested without an extra key.
    #[error("action key must not be empty")]
    EmptyKey,

    /// The payload of a generic action is neither a string nor a map.
    #[error("unsupported payload for action {key}: expected a string or a map, got {kind}")]
    UnsupportedPayload { key: String, kind: &'static str },
}

/// How the host should deliver a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Plain broadcast.
    Broadcast,
    /// Ordered broadcast; receivers are invoked one at a time.
    Ordered,
}

/// A fully assembled outbound command.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Broadcast action the command is addressed to.
    pub action: String,
    /// API key, payload and control fields.
    pub extras: WireContainer,
    pub delivery: Delivery,
}

impl Command {
    /// Creates a command carrying `payload` under the API extra `key`, with
    /// `SEND_RESULT` requested.
    pub fn new(key: impl Into<String>, payload: WireValue) -> Self {
        let mut extras = WireContainer::new();
        extras.insert(key, payload);
        extras.put_string(keys::SEND_RESULT, "true");
        Self {
            action: keys::API_ACTION.to_string(),
            extras,
            delivery: Delivery::Broadcast,
        }
    }

    /// Tags the command so its result broadcast can be correlated.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.extras
            .put_string(keys::COMMAND_IDENTIFIER, identifier.into());
        self
    }

    pub fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    /// Returns the extra stored under `key`.
    pub fn payload(&self, key: &str) -> Option<&WireValue> {
        self.extras.get(key)
    }

    pub fn identifier(&self) -> Option<&str> {
        self.extras.get_str(keys::COMMAND_IDENTIFIER)
    }

    /// Renders the extras as pretty JSON for logging.
    pub fn describe(&self) -> String {
        wire_to_json_text(&self.extras)
    }
}
