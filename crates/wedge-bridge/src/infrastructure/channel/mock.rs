//! Mock broadcast channel for unit and integration tests.
//!
//! Records every sent broadcast and every registration so tests can assert
//! on what a module did, and lets tests inject inbound broadcasts as if
//! DataWedge had sent them.
//!
//! # Usage in tests
//!
//! ```ignore
//! let channel = Arc::new(MockChannel::new());
//! let module = ScannerModule::new(BridgeConfig::default(), channel.clone());
//!
//! module.cancel_read();
//!
//! let sent = channel.sent.lock().unwrap();
//! assert_eq!(sent.len(), 3); // create profile, suspend, suspend
//! ```
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every `send` return
//! `ChannelError::Closed`, exercising the log-and-drop path.

use std::sync::Mutex;

use tokio::sync::mpsc;
use wedge_core::Delivery;

use crate::application::event_bridge::{BroadcastChannel, ChannelError, ReceiverId};
use crate::domain::{Intent, IntentFilter};

#[derive(Default)]
pub struct MockChannel {
    /// Every broadcast passed to `send`, in order.
    pub sent: Mutex<Vec<(Intent, Delivery)>>,
    /// Every filter passed to a successful `register_receiver`.
    pub registrations: Mutex<Vec<IntentFilter>>,
    /// Number of successful `unregister_receiver` calls.
    pub unregistrations: Mutex<usize>,
    /// Number of `unregister_receiver` calls, successful or not.
    pub unregister_calls: Mutex<usize>,
    receivers: Mutex<Vec<(ReceiverId, mpsc::UnboundedSender<Intent>)>>,
    /// When `true`, `send` fails with [`ChannelError::Closed`].
    pub should_fail: bool,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Delivers `intent` to every registered receiver, bypassing filters.
    /// Returns `false` if no receiver took it.
    pub fn inject(&self, intent: Intent) -> bool {
        let receivers = self.receivers.lock().unwrap();
        let mut delivered = false;
        for (_, tx) in receivers.iter() {
            delivered |= tx.send(intent.clone()).is_ok();
        }
        delivered
    }

    pub fn is_registered(&self) -> bool {
        !self.receivers.lock().unwrap().is_empty()
    }

    /// Ids of the live registrations, oldest first.
    pub fn registered_ids(&self) -> Vec<ReceiverId> {
        self.receivers
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| *id)
            .collect()
    }

    /// Every sent broadcast, in order, without its delivery mode.
    pub fn sent_intents(&self) -> Vec<Intent> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(intent, _)| intent.clone())
            .collect()
    }
}

impl BroadcastChannel for MockChannel {
    fn send(&self, intent: Intent, delivery: Delivery) -> Result<(), ChannelError> {
        if self.should_fail {
            return Err(ChannelError::Closed);
        }
        self.sent.lock().unwrap().push((intent, delivery));
        Ok(())
    }

    fn register_receiver(
        &self,
        filter: IntentFilter,
    ) -> Result<(ReceiverId, mpsc::UnboundedReceiver<Intent>), ChannelError> {
        let mut registrations = self.registrations.lock().unwrap();
        // Registrations only grow, so their count is a fresh id.
        let id = ReceiverId(registrations.len() as u64);
        let (tx, rx) = mpsc::unbounded_channel();
        self.receivers.lock().unwrap().push((id, tx));
        registrations.push(filter);
        Ok((id, rx))
    }

    fn unregister_receiver(&self, id: ReceiverId) -> Result<(), ChannelError> {
        *self.unregister_calls.lock().unwrap() += 1;
        let mut receivers = self.receivers.lock().unwrap();
        match receivers.iter().position(|(held, _)| *held == id) {
            Some(index) => {
                receivers.remove(index);
                *self.unregistrations.lock().unwrap() += 1;
                Ok(())
            }
            None => Err(ChannelError::NotRegistered(id)),
        }
    }
}
