//! Parsing of the host's `read(config)` argument.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::value::DynamicValue;

/// One caller-supplied BARCODE plugin parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraParam {
    pub key: String,
    pub value: String,
}

impl ExtraParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// What the application asked `read` for.
///
/// ```json
/// {"types": ["QR", "EAN-13"], "params": [{"key": "illumination_mode", "value": "torch"}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadRequest {
    /// Human decoder names; empty means "use the defaults".
    pub decoders: Vec<String>,
    pub params: Vec<ExtraParam>,
}

impl ReadRequest {
    /// Extracts a request from a dynamic map.
    ///
    /// Never fails: a non-map, a missing field or a malformed entry is skipped.
    /// `type` is accepted as an alias of `types`, either as a list or as a
    /// single string.
    pub fn from_dynamic(config: &DynamicValue) -> Self {
        let decoders = match config.get("types").or_else(|| config.get("type")) {
            Some(DynamicValue::List(items)) => items
                .iter()
                .filter_map(DynamicValue::as_str)
                .map(str::to_string)
                .collect(),
            Some(DynamicValue::String(name)) => vec![name.clone()],
            _ => Vec::new(),
        };

        let params = config
            .get("params")
            .and_then(DynamicValue::as_list)
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| {
                let key = entry.get("key").and_then(DynamicValue::as_str);
                let value = entry.get("value").and_then(DynamicValue::as_str);
                match (key, value) {
                    (Some(key), Some(value)) => Some(ExtraParam::new(key, value)),
                    _ => {
                        debug!(kind = entry.kind(), "skipping malformed read parameter");
                        None
                    }
                }
            })
            .collect();

        Self { decoders, params }
    }
}
