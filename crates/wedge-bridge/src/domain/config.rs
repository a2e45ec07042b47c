//! TOML configuration for the bridge.
//!
//! Every field has a default, so an empty file, a missing file, or a file
//! written for an older version all yield a working configuration:
//!
//! ```toml
//! profile_name = "WedgeApp"
//! package_name = "com.example.wedge"
//! default_decoders = ["QR", "Code 128", "EAN-13"]
//! log_level = "debug"
//! ```
//!
//! The DataWedge action strings are not configurable.  Profiles created by
//! the bridge always deliver scans on the fixed scan action, so letting the
//! receiver listen anywhere else would only lose scans.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wedge_core::command::DEFAULT_DECODERS;
use wedge_core::ReadRequest;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeConfig {
    /// DataWedge profile created and updated by the scanner module.
    #[serde(default = "default_profile_name")]
    pub profile_name: String,
    /// Package the profile is bound to.
    #[serde(default = "default_package_name")]
    pub package_name: String,
    /// Decoder names enabled when a read request names none.
    #[serde(default = "default_decoders")]
    pub default_decoders: Vec<String>,
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_profile_name() -> String {
    "WedgeApp".to_string()
}
fn default_package_name() -> String {
    "com.example.wedge".to_string()
}
fn default_decoders() -> Vec<String> {
    DEFAULT_DECODERS.iter().map(|name| name.to_string()).collect()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            profile_name: default_profile_name(),
            package_name: default_package_name(),
            default_decoders: default_decoders(),
            log_level: default_log_level(),
        }
    }
}

impl BridgeConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file, returning the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system errors other than "not
    /// found", and [`ConfigError::Parse`] if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Decoder names a read should enable: the request's own list, or the
    /// configured defaults when it names none.
    pub fn decoders_for(&self, request: &ReadRequest) -> Vec<String> {
        if request.decoders.is_empty() {
            self.default_decoders.clone()
        } else {
            request.decoders.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.default_decoders.len(), 6);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = BridgeConfig::from_toml_str(
            r#"
            profile_name = "Warehouse"
            default_decoders = ["EAN-13"]
            "#,
        )
        .unwrap();

        assert_eq!(config.profile_name, "Warehouse");
        assert_eq!(config.default_decoders, vec!["EAN-13".to_string()]);
        assert_eq!(config.package_name, "com.example.wedge");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = BridgeConfig::from_toml_str("profile_name = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("wedge-bridge-config-that-does-not-exist.toml");
        assert_eq!(BridgeConfig::load(&path).unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_decoders_for_prefers_the_request() {
        let config = BridgeConfig::default();

        let explicit = ReadRequest {
            decoders: vec!["Aztec".to_string()],
            params: Vec::new(),
        };
        assert_eq!(config.decoders_for(&explicit), vec!["Aztec".to_string()]);
        assert_eq!(config.decoders_for(&ReadRequest::default()), config.default_decoders);
    }
}
