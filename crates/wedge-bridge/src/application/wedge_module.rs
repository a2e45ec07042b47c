//! WedgeModule: the generic host module.
//!
//! Sends no commands of its own.  The application picks the action to listen
//! on with [`WedgeModule::register_receiver`]; until it does, host resumes do
//! not subscribe.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;
use wedge_core::command::keys;
use wedge_core::DynamicValue;

use super::dispatch;
use super::event_bridge::{BroadcastChannel, EventBridge};
use crate::domain::{BridgeEvent, IntentFilter};

pub struct WedgeModule {
    channel: Arc<dyn BroadcastChannel>,
    bridge: EventBridge,
    action: Option<String>,
}

impl WedgeModule {
    pub fn new(channel: Arc<dyn BroadcastChannel>) -> Self {
        let bridge = EventBridge::new(Arc::clone(&channel));
        Self {
            channel,
            bridge,
            action: None,
        }
    }

    fn filter(action: &str) -> IntentFilter {
        IntentFilter::new()
            .add_action(keys::RESULT_ACTION)
            .add_action(action)
            .add_category(keys::DEFAULT_CATEGORY)
    }

    pub fn listen(&self) -> broadcast::Receiver<BridgeEvent> {
        self.bridge.listen()
    }

    pub fn bridge(&self) -> &EventBridge {
        &self.bridge
    }

    /// The action chosen by the last `register_receiver` call.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Subscribes to `action` (plus the result action) now, and on every later
    /// host resume.
    pub fn register_receiver(&mut self, action: &str) {
        debug!(action, "register receiver");
        self.action = Some(action.to_string());
        self.bridge.subscribe(Self::filter(action));
    }

    pub fn broadcast_action(&self, key: &str, data: &DynamicValue) {
        dispatch::broadcast_action(self.channel.as_ref(), key, data);
    }

    pub fn on_host_resume(&mut self) {
        match &self.action {
            Some(action) => {
                debug!(action = %action, "host resume");
                let filter = Self::filter(action);
                self.bridge.subscribe(filter);
            }
            None => debug!("host resume without a registered receiver"),
        }
    }

    pub fn on_host_pause(&mut self) {
        debug!("host pause");
        self.bridge.unsubscribe();
    }

    pub fn on_host_destroy(&mut self) {
        debug!("host destroy");
        self.bridge.unsubscribe();
    }
}
