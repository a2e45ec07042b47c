//! wedge-bridge library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does wedge-bridge do?
//!
//! DataWedge runs as a separate service on the scanning device.  The bridge
//! sits between it and the embedding application:
//!
//! 1. Outbound, it turns application calls (`read`, `cancel_read`,
//!    `broadcast_action`) into DataWedge commands built by `wedge_core` and
//!    hands them to a [`BroadcastChannel`](application::event_bridge::BroadcastChannel).
//! 2. Inbound, it subscribes to DataWedge's result and scan broadcasts while
//!    the host is in the foreground, strips extras the application cannot
//!    carry, and republishes them as typed events.
//!
//! Nothing is acknowledged by DataWedge.  A command that was sent is simply
//! gone; the only feedback is a later result broadcast.

/// Domain types: configuration, intents and the events listeners receive.
pub mod domain;

/// Application layer: the event bridge and the two host-facing modules.
pub mod application;

/// Infrastructure layer: broadcast channel implementations.
pub mod infrastructure;
