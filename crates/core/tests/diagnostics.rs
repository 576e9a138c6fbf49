//! Integration tests for the call-logging decorator.
//!
//! Diagnostics exist to make a misbehaving host observable without
//! perturbing it. These tests pin down the transparency guarantee: with
//! the decorator on, the host object sees byte-identical envelopes, the
//! same callback presence, and the same response timing as with it off.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use wvb::{AcquireConfig, Bridge, BridgeRuntime, DiagnosticBridge, RecordingBridge, SimulatedPage};

fn delivered_bridge(diagnostics: bool, host: Arc<RecordingBridge>) -> Bridge {
    let page = Arc::new(SimulatedPage::new());
    page.install_bridge(host);
    let config = AcquireConfig::new().diagnostics(diagnostics);
    let runtime = BridgeRuntime::new(page, config);
    runtime.register_consumer(|_| {});
    runtime.try_bridge().unwrap()
}

#[test]
fn the_host_sees_identical_envelopes_either_way() {
    let plain_host = Arc::new(RecordingBridge::new());
    let logged_host = Arc::new(RecordingBridge::new());
    let plain = delivered_bridge(false, plain_host.clone());
    let logged = delivered_bridge(true, logged_host.clone());

    for bridge in [&plain, &logged] {
        bridge.call_handler("trackEvent", json!({"name": "open", "ts": 1}), None);
        bridge.call_handler("getUserInfo", json!({"id": 9}), Some(Box::new(|_| {})));
        bridge.call_handler("refresh", Value::Null, None);
    }

    assert_eq!(plain_host.calls(), logged_host.calls());
}

#[test]
fn responses_flow_through_the_decorator_untouched() {
    let host = Arc::new(RecordingBridge::new());
    let bridge = delivered_bridge(true, host.clone());
    let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    bridge.call_handler(
        "getToken",
        Value::Null,
        Some(Box::new(move |data| sink.lock().unwrap().push(data))),
    );

    // Logging must not force an early or synthetic response.
    assert!(seen.lock().unwrap().is_empty());

    let id = host.calls()[0].callback_id.clone().unwrap();
    assert!(host.respond(&id, json!({"token": "abc"})));
    assert_eq!(seen.lock().unwrap().as_slice(), &[json!({"token": "abc"})]);
    assert_eq!(host.pending_responses(), 0);
}

#[test]
fn decorator_wraps_only_when_enabled() {
    let plain = delivered_bridge(false, Arc::new(RecordingBridge::new()));
    let logged = delivered_bridge(true, Arc::new(RecordingBridge::new()));

    assert!(plain.raw().downcast_ref::<RecordingBridge>().is_some());
    assert!(plain.raw().downcast_ref::<DiagnosticBridge>().is_none());

    let decorator = logged.raw().downcast_ref::<DiagnosticBridge>().unwrap();
    assert!(decorator.inner().downcast_ref::<RecordingBridge>().is_some());
}

#[test]
fn legacy_init_stub_holds_behind_the_decorator() {
    let host = Arc::new(RecordingBridge::without_init());
    let bridge = delivered_bridge(true, host.clone());

    bridge.init();

    assert!(!bridge.init_forwards());
    assert_eq!(host.init_calls(), 0);
}
