//! Infrastructure layer for the bridge.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain` and
//! `wedge_core`, but MUST NOT be imported by the `application` or domain
//! layers.
//!
//! # Sub-modules
//!
//! - **`channel`** – Implementations of `BroadcastChannel`: an in-process
//!   loopback used by the binary, and a recording mock for tests.

pub mod channel;
