//! Broadcast channel implementations.
//!
//! On a device the channel is the platform's broadcast mechanism.  Off the
//! device, [`LoopbackChannel`] stands in for it: broadcasts sent through it
//! reach every registered receiver whose filter matches them, and every sent
//! broadcast can be observed on a tap.

pub mod loopback;
pub mod mock;

pub use loopback::LoopbackChannel;
pub use mock::MockChannel;
