//! In-process broadcast channel backed by Tokio mpsc channels.

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, trace};
use wedge_core::Delivery;

use crate::application::event_bridge::{BroadcastChannel, ChannelError, ReceiverId};
use crate::domain::{Intent, IntentFilter};

struct Registration {
    id: ReceiverId,
    filter: IntentFilter,
    tx: mpsc::UnboundedSender<Intent>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Registration>,
}

/// Delivers each sent broadcast to every registered receiver whose filter
/// matches it.
///
/// Every broadcast, matching or not, is also copied to the tap when one was
/// requested with [`LoopbackChannel::with_tap`].
#[derive(Default)]
pub struct LoopbackChannel {
    registry: Mutex<Registry>,
    tap: Option<mpsc::UnboundedSender<(Intent, Delivery)>>,
}

impl LoopbackChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a channel whose sent broadcasts are copied to the returned
    /// receiver.
    pub fn with_tap() -> (Self, mpsc::UnboundedReceiver<(Intent, Delivery)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let channel = Self {
            registry: Mutex::default(),
            tap: Some(tx),
        };
        (channel, rx)
    }

    pub fn has_receiver(&self) -> bool {
        self.receiver_count() > 0
    }

    pub fn receiver_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

impl BroadcastChannel for LoopbackChannel {
    fn send(&self, intent: Intent, delivery: Delivery) -> Result<(), ChannelError> {
        if let Some(tap) = &self.tap {
            // A dropped tap only means nobody is watching.
            let _ = tap.send((intent.clone(), delivery));
        }

        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let mut delivered = 0;
        registry.entries.retain(|registration| {
            if !registration.filter.matches(&intent) {
                return true;
            }
            if registration.tx.send(intent.clone()).is_ok() {
                delivered += 1;
                return true;
            }
            debug!(receiver = %registration.id, "receiver dropped; registration removed");
            false
        });
        trace!(action = %intent.action, delivered, "broadcast sent");
        Ok(())
    }

    fn register_receiver(
        &self,
        filter: IntentFilter,
    ) -> Result<(ReceiverId, mpsc::UnboundedReceiver<Intent>), ChannelError> {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = ReceiverId(registry.next_id);
        registry.next_id += 1;

        let (tx, rx) = mpsc::unbounded_channel();
        debug!(receiver = %id, actions = ?filter.actions(), "receiver registered");
        registry.entries.push(Registration { id, filter, tx });
        Ok((id, rx))
    }

    fn unregister_receiver(&self, id: ReceiverId) -> Result<(), ChannelError> {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        match registry.entries.iter().position(|r| r.id == id) {
            Some(index) => {
                registry.entries.remove(index);
                debug!(receiver = %id, "receiver unregistered");
                Ok(())
            }
            None => Err(ChannelError::NotRegistered(id)),
        }
    }
}
