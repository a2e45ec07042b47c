//! Integration tests for the host modules and the event bridge.
//!
//! These drive `ScannerModule` and `WedgeModule` over the recording
//! `MockChannel` (and once over the `LoopbackChannel`), covering the command
//! sequence, the subscription lifecycle, and end-to-end event delivery.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use wedge_bridge::application::{BroadcastChannel, ScannerModule, SubscriptionState, WedgeModule};
use wedge_bridge::domain::{BridgeConfig, BridgeEvent, Intent, ScanEvent};
use wedge_bridge::infrastructure::channel::{LoopbackChannel, MockChannel};
use wedge_core::command::keys;
use wedge_core::{Delivery, DynamicValue, WireValue};

const WEDGE_ACTION: &str = "com.example.wedge.ACTION";

async fn next_event(rx: &mut broadcast::Receiver<BridgeEvent>) -> BridgeEvent {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("event must arrive within a second")
        .expect("event channel must stay open")
}

fn scan_broadcast() -> Intent {
    let mut intent = Intent::new(keys::SCAN_ACTION).with_category(keys::DEFAULT_CATEGORY);
    intent
        .extras
        .put_string(keys::EXTRA_DATA_STRING, "0123456789012")
        .put_string(keys::EXTRA_LABEL_TYPE, "LABEL-TYPE-EAN13")
        .put_string(keys::EXTRA_SOURCE, "scanner");
    intent
}

fn wedge_broadcast(data: &str) -> Intent {
    let mut intent = Intent::new(WEDGE_ACTION);
    intent.extras.put_string(keys::EXTRA_DATA_STRING, data);
    intent
}

fn scanner(channel: &Arc<MockChannel>) -> ScannerModule {
    let channel: Arc<dyn BroadcastChannel> = channel.clone();
    ScannerModule::new(BridgeConfig::default(), channel)
}

// ── ScannerModule commands ────────────────────────────────────────────────────

#[test]
fn test_scanner_init_creates_profile_then_suspends() {
    let channel = Arc::new(MockChannel::new());
    let _module = scanner(&channel);

    let sent = channel.sent_intents();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent[0].extras.get_str(keys::COMMAND_IDENTIFIER),
        Some(keys::CREATE_PROFILE_ID)
    );
    assert_eq!(
        sent[1].extras.get_str(keys::SCANNER_INPUT_PLUGIN),
        Some(keys::SUSPEND_PLUGIN)
    );
}

#[test]
fn test_read_uses_configured_defaults_then_resumes() {
    let channel = Arc::new(MockChannel::new());
    let config = BridgeConfig {
        default_decoders: vec!["Aztec".to_string()],
        ..BridgeConfig::default()
    };
    let dyn_channel: Arc<dyn BroadcastChannel> = channel.clone();
    let module = ScannerModule::new(config, dyn_channel);

    module.read(&DynamicValue::from_json(r#"{"types": []}"#).unwrap());

    let sent = channel.sent_intents();
    assert_eq!(sent.len(), 4);
    let params = sent[2]
        .extras
        .get_container(keys::SET_CONFIG)
        .and_then(|p| p.get_container("PLUGIN_CONFIG"))
        .and_then(|p| p.get_container("PARAM_LIST"))
        .unwrap();
    assert_eq!(params.get_str("decoder_aztec"), Some("true"));
    assert_eq!(params.get_str("decoder_qrcode"), Some("false"));
    assert_eq!(
        sent[3].extras.get_str(keys::SCANNER_INPUT_PLUGIN),
        Some(keys::RESUME_PLUGIN)
    );
}

#[test]
fn test_broadcast_action_is_ordered_and_bad_payloads_are_dropped() {
    let channel = Arc::new(MockChannel::new());
    let module = scanner(&channel);

    module.broadcast_action("com.symbol.datawedge.api.SOFT_SCAN_TRIGGER", &"START_SCANNING".into());
    module.broadcast_action("com.symbol.datawedge.api.SOFT_SCAN_TRIGGER", &DynamicValue::from(1));

    let sent = channel.sent.lock().unwrap();
    assert_eq!(sent.len(), 3, "the integer payload must not be sent");
    let (intent, delivery) = &sent[2];
    assert_eq!(*delivery, Delivery::Ordered);
    assert_eq!(
        intent.extras.get_str("com.symbol.datawedge.api.SOFT_SCAN_TRIGGER"),
        Some("START_SCANNING")
    );
}

#[test]
fn test_failing_channel_never_panics() {
    let channel = Arc::new(MockChannel::failing());
    let module = scanner(&channel);

    module.read(&DynamicValue::Null);
    module.cancel_read();

    assert!(channel.sent.lock().unwrap().is_empty());
}

// ── Subscription lifecycle ────────────────────────────────────────────────────

#[tokio::test]
async fn test_double_subscribe_and_double_unsubscribe_are_no_ops() {
    let channel = Arc::new(MockChannel::new());
    let mut module = scanner(&channel);

    module.on_host_resume();
    module.on_host_resume();
    assert!(module.bridge().is_subscribed());
    assert_eq!(channel.registrations.lock().unwrap().len(), 1);

    module.on_host_pause();
    module.on_host_destroy();
    assert_eq!(module.bridge().state(), &SubscriptionState::Unsubscribed);
    assert_eq!(*channel.unregistrations.lock().unwrap(), 1);
    assert_eq!(*channel.unregister_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_pause_before_any_resume_is_harmless() {
    let channel = Arc::new(MockChannel::new());
    let mut module = scanner(&channel);

    module.on_host_pause();

    assert!(!module.bridge().is_subscribed());
    assert_eq!(*channel.unregister_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_scanner_subscribes_to_result_and_scan_actions() {
    let channel = Arc::new(MockChannel::new());
    let mut module = scanner(&channel);

    module.on_host_resume();

    let registrations = channel.registrations.lock().unwrap();
    let filter = &registrations[0];
    assert_eq!(
        filter.actions(),
        [keys::RESULT_ACTION.to_string(), keys::SCAN_ACTION.to_string()]
    );
    assert_eq!(filter.categories(), [keys::DEFAULT_CATEGORY.to_string()]);
}

// ── Event delivery ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_scan_broadcast_yields_broadcast_then_scan_event() {
    let channel = Arc::new(MockChannel::new());
    let mut module = scanner(&channel);
    module.on_host_resume();
    let mut events = module.listen();

    assert!(channel.inject(scan_broadcast()));

    match next_event(&mut events).await {
        BridgeEvent::Broadcast(event) => {
            assert_eq!(event.fields.len(), 3);
            assert_eq!(
                event.fields.get(keys::EXTRA_DATA_STRING),
                Some(&DynamicValue::from("0123456789012"))
            );
            assert_eq!(
                event.fields.get(keys::EXTRA_LABEL_TYPE),
                Some(&DynamicValue::from("LABEL-TYPE-EAN13"))
            );
            assert_eq!(
                event.fields.get(keys::EXTRA_SOURCE),
                Some(&DynamicValue::from("scanner"))
            );
        }
        other => panic!("expected the broadcast event first, got {other:?}"),
    }
    assert_eq!(
        next_event(&mut events).await,
        BridgeEvent::Scan(ScanEvent {
            data: "0123456789012".to_string(),
            label_type: "EAN-13".to_string(),
        })
    );
}

#[tokio::test]
async fn test_byte_and_list_extras_are_stripped() {
    let channel = Arc::new(MockChannel::new());
    let mut module = scanner(&channel);
    module.on_host_resume();
    let mut events = module.listen();

    let mut intent = Intent::new(keys::RESULT_ACTION);
    intent.extras.put_string("RESULT", "SUCCESS");
    intent.extras.insert("RAW", WireValue::ByteArray(vec![0xde, 0xad]));
    intent.extras.insert(
        "RESULT_LIST",
        WireValue::List(vec![WireValue::String("a".to_string())]),
    );
    assert!(channel.inject(intent));

    match next_event(&mut events).await {
        BridgeEvent::Broadcast(event) => {
            assert_eq!(event.fields.get("RESULT"), Some(&DynamicValue::from("SUCCESS")));
            assert!(!event.fields.contains_key("RAW"));
            assert!(!event.fields.contains_key("RESULT_LIST"));
        }
        other => panic!("expected a broadcast event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unsubscribe_stops_delivery() {
    let channel = Arc::new(MockChannel::new());
    let mut module = scanner(&channel);
    module.on_host_resume();
    module.on_host_pause();

    assert!(!channel.inject(scan_broadcast()));
}

#[tokio::test]
async fn test_loopback_delivers_matching_scan_to_listeners() {
    let loopback = Arc::new(LoopbackChannel::new());
    let channel: Arc<dyn BroadcastChannel> = loopback.clone();
    let mut module = ScannerModule::new(BridgeConfig::default(), Arc::clone(&channel));
    module.on_host_resume();
    let mut events = module.listen();

    loopback.send(scan_broadcast(), Delivery::Broadcast).unwrap();

    assert_eq!(next_event(&mut events).await.name(), "onBroadcastReceiver");
    assert_eq!(next_event(&mut events).await.name(), "onBarcode");

    module.on_host_destroy();
    assert!(!loopback.has_receiver());
}

// ── WedgeModule ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wedge_resume_without_receiver_does_not_subscribe() {
    let channel = Arc::new(MockChannel::new());
    let dyn_channel: Arc<dyn BroadcastChannel> = channel.clone();
    let mut module = WedgeModule::new(dyn_channel);

    module.on_host_resume();

    assert!(!module.bridge().is_subscribed());
    assert!(channel.registrations.lock().unwrap().is_empty());
    assert!(channel.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_wedge_registered_action_survives_pause_and_resume() {
    let channel = Arc::new(MockChannel::new());
    let dyn_channel: Arc<dyn BroadcastChannel> = channel.clone();
    let mut module = WedgeModule::new(dyn_channel);

    module.register_receiver(WEDGE_ACTION);
    module.on_host_pause();
    module.on_host_resume();

    assert_eq!(module.action(), Some(WEDGE_ACTION));
    let registrations = channel.registrations.lock().unwrap();
    assert_eq!(registrations.len(), 2);
    assert_eq!(registrations[0], registrations[1]);
    assert_eq!(
        registrations[1].actions(),
        [keys::RESULT_ACTION.to_string(), WEDGE_ACTION.to_string()]
    );
}

#[tokio::test]
async fn test_wedge_emits_only_generic_events() {
    let channel = Arc::new(MockChannel::new());
    let dyn_channel: Arc<dyn BroadcastChannel> = channel.clone();
    let mut module = WedgeModule::new(dyn_channel);
    module.register_receiver(WEDGE_ACTION);
    let mut events = module.listen();

    assert!(channel.inject(wedge_broadcast("abc")));

    assert!(matches!(next_event(&mut events).await, BridgeEvent::Broadcast(_)));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_wedge_reregistering_replaces_the_subscription() {
    let channel = Arc::new(MockChannel::new());
    let dyn_channel: Arc<dyn BroadcastChannel> = channel.clone();
    let mut module = WedgeModule::new(dyn_channel);

    module.register_receiver("first");
    module.register_receiver("second");

    assert_eq!(channel.registrations.lock().unwrap().len(), 2);
    assert_eq!(*channel.unregistrations.lock().unwrap(), 1);
    match module.bridge().state() {
        SubscriptionState::Subscribed(filter) => {
            assert!(filter.actions().contains(&"second".to_string()))
        }
        other => panic!("expected a subscription, got {other:?}"),
    }
}

// ── Shared channel ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pause_of_unsubscribed_module_keeps_other_registrations() {
    let channel = Arc::new(MockChannel::new());
    let (other, _other_rx) = channel
        .register_receiver(ScannerModule::filter())
        .unwrap();
    let dyn_channel: Arc<dyn BroadcastChannel> = channel.clone();
    let mut module = WedgeModule::new(dyn_channel);

    module.on_host_pause();
    module.on_host_destroy();

    assert_eq!(*channel.unregister_calls.lock().unwrap(), 0);
    assert_eq!(channel.registered_ids(), vec![other]);
}

#[tokio::test]
async fn test_wedge_registers_alongside_a_subscribed_scanner() {
    let loopback = Arc::new(LoopbackChannel::new());
    let channel: Arc<dyn BroadcastChannel> = loopback.clone();
    let mut scanner = ScannerModule::new(BridgeConfig::default(), Arc::clone(&channel));
    let mut wedge = WedgeModule::new(Arc::clone(&channel));

    scanner.on_host_resume();
    wedge.register_receiver(WEDGE_ACTION);

    assert!(scanner.bridge().is_subscribed());
    assert!(wedge.bridge().is_subscribed());
    assert_eq!(loopback.receiver_count(), 2);
    assert_ne!(scanner.bridge().receiver_id(), wedge.bridge().receiver_id());
}

#[tokio::test]
async fn test_modules_sharing_a_channel_survive_each_others_lifecycle() {
    let loopback = Arc::new(LoopbackChannel::new());
    let channel: Arc<dyn BroadcastChannel> = loopback.clone();
    let mut scanner = ScannerModule::new(BridgeConfig::default(), Arc::clone(&channel));
    let mut wedge = WedgeModule::new(Arc::clone(&channel));
    let mut scanner_events = scanner.listen();
    let mut wedge_events = wedge.listen();

    scanner.on_host_resume();
    wedge.on_host_pause();
    assert!(scanner.bridge().is_subscribed());
    assert!(loopback.has_receiver());

    wedge.register_receiver(WEDGE_ACTION);
    wedge.on_host_pause();
    wedge.on_host_resume();

    loopback.send(scan_broadcast(), Delivery::Broadcast).unwrap();
    assert_eq!(next_event(&mut scanner_events).await.name(), "onBroadcastReceiver");
    assert_eq!(next_event(&mut scanner_events).await.name(), "onBarcode");

    scanner.on_host_pause();
    assert!(wedge.bridge().is_subscribed());
    assert_eq!(loopback.receiver_count(), 1);

    loopback
        .send(wedge_broadcast("abc"), Delivery::Broadcast)
        .unwrap();
    match next_event(&mut wedge_events).await {
        BridgeEvent::Broadcast(event) => assert_eq!(event.action, WEDGE_ACTION),
        other => panic!("expected a broadcast event, got {other:?}"),
    }

    scanner.on_host_resume();
    loopback.send(scan_broadcast(), Delivery::Broadcast).unwrap();
    assert_eq!(next_event(&mut scanner_events).await.name(), "onBroadcastReceiver");
    assert_eq!(next_event(&mut scanner_events).await.name(), "onBarcode");
    assert!(wedge_events.try_recv().is_err());
}
