//! Outbound command dispatch shared by both host modules.

use tracing::{debug, warn};
use wedge_core::command::generic_action;
use wedge_core::{Command, DynamicValue};

use super::event_bridge::BroadcastChannel;
use crate::domain::Intent;

/// Sends `command` and forgets it.  A channel failure is logged and the
/// command dropped; it is never retried.
pub fn dispatch(channel: &dyn BroadcastChannel, command: Command) {
    let delivery = command.delivery;
    let intent = Intent::from(command);
    match channel.send(intent, delivery) {
        Ok(()) => debug!(?delivery, "command sent"),
        Err(e) => warn!("dropping command: {e}"),
    }
}

/// Sends `data` under the API extra `key` as an ordered broadcast.
///
/// `data` must be a string or a map; anything else is logged and dropped.
pub fn broadcast_action(channel: &dyn BroadcastChannel, key: &str, data: &DynamicValue) {
    match generic_action(key, data) {
        Ok(command) => dispatch(channel, command),
        Err(e) => warn!("dropping action: {e}"),
    }
}
