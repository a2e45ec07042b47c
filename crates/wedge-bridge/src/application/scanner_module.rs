//! ScannerModule: the barcode-reading host module.
//!
//! On construction it makes sure the profile exists and leaves the scanner
//! suspended.  `read` configures the decoders and resumes scanning;
//! `cancel_read` suspends it again.  While the host is in the foreground the
//! module listens on the fixed result and scan actions.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info};
use wedge_core::command::{self, keys};
use wedge_core::{DynamicValue, ReadRequest};

use super::dispatch::{self, dispatch};
use super::event_bridge::{BroadcastChannel, EventBridge};
use crate::domain::{BridgeConfig, BridgeEvent, IntentFilter};

pub struct ScannerModule {
    config: BridgeConfig,
    channel: Arc<dyn BroadcastChannel>,
    bridge: EventBridge,
}

impl ScannerModule {
    /// Creates the module and sends the create-profile and suspend commands.
    pub fn new(config: BridgeConfig, channel: Arc<dyn BroadcastChannel>) -> Self {
        info!(profile = %config.profile_name, package = %config.package_name, "scanner module init");
        dispatch(
            channel.as_ref(),
            command::create_profile(&config.profile_name, &config.package_name),
        );
        dispatch(channel.as_ref(), command::suspend());

        let bridge = EventBridge::new(Arc::clone(&channel));
        Self {
            config,
            channel,
            bridge,
        }
    }

    /// The filter used while the host is in the foreground.
    pub fn filter() -> IntentFilter {
        IntentFilter::new()
            .add_action(keys::RESULT_ACTION)
            .add_action(keys::SCAN_ACTION)
            .add_category(keys::DEFAULT_CATEGORY)
    }

    pub fn listen(&self) -> broadcast::Receiver<BridgeEvent> {
        self.bridge.listen()
    }

    pub fn bridge(&self) -> &EventBridge {
        &self.bridge
    }

    /// Handles the host's `read(config)` call.
    pub fn read(&self, config: &DynamicValue) {
        self.read_request(&ReadRequest::from_dynamic(config));
    }

    /// Enables the requested decoders (or the configured defaults) and
    /// resumes scanning.
    pub fn read_request(&self, request: &ReadRequest) {
        let decoders = self.config.decoders_for(request);
        debug!(?decoders, params = request.params.len(), "read");
        let (update, resume) =
            command::barcode_config(&self.config.profile_name, &decoders, &request.params);
        dispatch(self.channel.as_ref(), update);
        dispatch(self.channel.as_ref(), resume);
    }

    pub fn cancel_read(&self) {
        debug!("cancel read");
        dispatch(self.channel.as_ref(), command::suspend());
    }

    pub fn broadcast_action(&self, key: &str, data: &DynamicValue) {
        dispatch::broadcast_action(self.channel.as_ref(), key, data);
    }

    pub fn on_host_resume(&mut self) {
        debug!("host resume");
        self.bridge.subscribe(Self::filter());
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
