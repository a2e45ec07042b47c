//! EventBridge: subscribes to DataWedge broadcasts and republishes them.
//!
//! The bridge is a two-state machine driven by the host lifecycle:
//!
//! ```text
//!   Unsubscribed ──subscribe(filter)──▶ Subscribed(filter)
//!        ▲                                   │
//!        └────────────unsubscribe()──────────┘
//! ```
//!
//! Subscribing while already subscribed with the same filter and
//! unsubscribing while unsubscribed are no-ops decided from the bridge's own
//! state; the channel is not touched.  Several bridges may share one channel.
//! Each holds the [`ReceiverId`] of its own registration and only ever
//! unregisters that one.
//!
//! While subscribed, a pump task drains the channel's receiver.  Each
//! broadcast is translated into one or two [`BridgeEvent`]s and sent on a
//! `tokio::sync::broadcast` channel.  A listener that falls behind loses
//! events; nothing is queued for later.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use wedge_core::command::keys;
use wedge_core::Delivery;

use crate::domain::{BridgeEvent, BroadcastEvent, Intent, IntentFilter, ScanEvent};

/// Capacity of the listener channel.
const EVENT_CAPACITY: usize = 64;

/// Error type for broadcast channel operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The channel can no longer deliver anything.
    #[error("broadcast channel is closed")]
    Closed,
    /// `unregister_receiver` was given an id the channel does not hold.
    #[error("receiver {0} is not registered")]
    NotRegistered(ReceiverId),
}

/// Identifies one registration on a [`BroadcastChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiverId(pub u64);

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The host's broadcast mechanism.
///
/// A channel carries any number of receivers, each with its own filter.
/// Implementations live in the infrastructure layer.
pub trait BroadcastChannel: Send + Sync {
    /// Sends a one-way broadcast.  There is no reply.
    fn send(&self, intent: Intent, delivery: Delivery) -> Result<(), ChannelError>;

    /// Registers a receiver.  Matching broadcasts arrive on the returned
    /// receiver until [`unregister_receiver`](Self::unregister_receiver) is
    /// called with the returned id.
    fn register_receiver(
        &self,
        filter: IntentFilter,
    ) -> Result<(ReceiverId, mpsc::UnboundedReceiver<Intent>), ChannelError>;

    /// Removes the registration `id` and no other.
    fn unregister_receiver(&self, id: ReceiverId) -> Result<(), ChannelError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionState {
    Unsubscribed,
    Subscribed(IntentFilter),
}

/// The registration and pump task behind a `Subscribed` state.
struct ActiveSubscription {
    id: ReceiverId,
    pump: JoinHandle<()>,
}

pub struct EventBridge {
    channel: Arc<dyn BroadcastChannel>,
    state: SubscriptionState,
    active: Option<ActiveSubscription>,
    events: broadcast::Sender<BridgeEvent>,
}

impl EventBridge {
    pub fn new(channel: Arc<dyn BroadcastChannel>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            channel,
            state: SubscriptionState::Unsubscribed,
            active: None,
            events,
        }
    }

    /// Returns a receiver for every event published from now on.
    pub fn listen(&self) -> broadcast::Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> &SubscriptionState {
        &self.state
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.state, SubscriptionState::Subscribed(_))
    }

    /// The channel registration held while subscribed.
    pub fn receiver_id(&self) -> Option<ReceiverId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Registers for broadcasts matching `filter` and starts the pump task.
    ///
    /// A different filter replaces the current subscription.  Must be called
    /// from within a Tokio runtime; without one nothing is registered and a
    /// warning is logged.
    pub fn subscribe(&mut self, filter: IntentFilter) {
        if let SubscriptionState::Subscribed(current) = &self.state {
            if *current == filter {
                debug!("already subscribed; ignoring");
                return;
            }
            debug!("subscription filter changed; re-registering");
            self.unsubscribe();
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("cannot start the event pump outside a Tokio runtime: {e}");
                return;
            }
        };

        let (id, rx) = match self.channel.register_receiver(filter.clone()) {
            Ok(registration) => registration,
            Err(e) => {
                warn!("failed to register broadcast receiver: {e}");
                return;
            }
        };

        let pump = handle.spawn(pump(rx, self.events.clone()));
        debug!(receiver = %id, actions = ?filter.actions(), "subscribed");
        self.active = Some(ActiveSubscription { id, pump });
        self.state = SubscriptionState::Subscribed(filter);
    }

    /// Unregisters this bridge's receiver and stops the pump task.
    pub fn unsubscribe(&mut self) {
        let Some(active) = self.active.take() else {
            debug!("not subscribed; nothing to unsubscribe");
            return;
        };

        active.pump.abort();
        match self.channel.unregister_receiver(active.id) {
            Ok(()) => debug!(receiver = %active.id, "unsubscribed"),
            Err(e) => warn!("failed to unregister broadcast receiver: {e}"),
        }
        self.state = SubscriptionState::Unsubscribed;
    }
}

impl Drop for EventBridge {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Translates one inbound broadcast into the events listeners receive.
///
/// The generic event always comes first; a scan broadcast adds a scan event.
pub fn translate(intent: &Intent) -> Vec<BridgeEvent> {
    trace!(action = %intent.action, "received broadcast");
    let mut events = vec![BridgeEvent::Broadcast(BroadcastEvent::from_extras(
        &intent.action,
        &intent.extras,
    ))];

    if intent.action == keys::SCAN_ACTION {
        if let Some(source) = intent.extras.get_str(keys::EXTRA_SOURCE) {
            trace!(source, "scan source");
        }
        events.push(BridgeEvent::Scan(ScanEvent::from_extras(&intent.extras)));
    }
    events
}

/// Publishes the events for one broadcast.  Events with no listener are
/// dropped.
pub fn handle_broadcast(intent: &Intent, events: &broadcast::Sender<BridgeEvent>) {
    for event in translate(intent) {
        let name = event.name();
        match events.send(event) {
            Ok(listeners) => trace!(event = name, listeners, "event published"),
            Err(_) => trace!(event = name, "no listeners; event dropped"),
        }
    }
}

/// Drains `rx` until the channel unregisters the receiver.
pub async fn pump(mut rx: mpsc::UnboundedReceiver<Intent>, events: broadcast::Sender<BridgeEvent>) {
    while let Some(intent) = rx.recv().await {
        handle_broadcast(&intent, &events);
    }
    debug!("broadcast receiver closed; pump stopped");
}
