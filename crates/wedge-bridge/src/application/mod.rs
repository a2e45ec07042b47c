//! Application layer for the bridge.
//!
//! - **`event_bridge`** – The subscription state machine, the
//!   `BroadcastChannel` seam the infrastructure implements, and the
//!   translation of inbound broadcasts into events.
//!
//! - **`scanner_module`** – Host module for barcode reading: profile setup,
//!   `read` / `cancel_read`, and a fixed subscription to result and scan
//!   broadcasts.
//!
//! - **`wedge_module`** – Generic host module that only listens on an action
//!   the application registers.
//!
//! Both modules send generic actions through `dispatch`.

pub mod dispatch;
pub mod event_bridge;
pub mod scanner_module;
pub mod wedge_module;

pub use event_bridge::{
    BroadcastChannel, ChannelError, EventBridge, ReceiverId, SubscriptionState,
};
pub use scanner_module::ScannerModule;
pub use wedge_module::WedgeModule;
