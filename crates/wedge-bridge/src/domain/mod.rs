//! Domain types shared by the application and infrastructure layers.
//!
//! - **`config`** – `BridgeConfig`, loaded from TOML with defaults for every
//!   field.
//! - **`intent`** – The broadcast message model (`Intent`) and the filter a
//!   receiver subscribes with (`IntentFilter`).
//! - **`events`** – What listeners receive: `BroadcastEvent` for every
//!   inbound broadcast and `ScanEvent` for decoded barcodes.

pub mod config;
pub mod events;
pub mod intent;

pub use config::{BridgeConfig, ConfigError};
pub use events::{BridgeEvent, BroadcastEvent, ScanEvent};
pub use intent::{Intent, IntentFilter};
