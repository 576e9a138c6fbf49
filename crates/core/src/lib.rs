//! wvb: WebView JavaScript bridge acquisition for embedded pages
//!
//! Pages embedded in a mobile WebView talk to their host app through a
//! bridge object the host injects. Hosts differ in when and how the
//! object shows up: some install it before the page runs, some want to
//! be woken by a probe navigation, and all generations announce it with
//! a `WebViewJavascriptBridgeReady` document event. This crate hides that
//! dance: register a consumer (or await a waiter) and receive a
//! normalized [`Bridge`] handle exactly once, in registration order.
//!
//! # Examples
//!
//! ## Callback-style registration
//!
//! ```ignore
//! use serde_json::json;
//! use wvb::{AcquireConfig, BridgeRuntime};
//!
//! // `page` adapts your WebView shell to the PageEnvironment trait.
//! let runtime = BridgeRuntime::new(page, AcquireConfig::from_env());
//!
//! runtime.register_consumer(|bridge| {
//!     bridge.init();
//!     bridge.call_handler(
//!         "getUserInfo",
//!         json!({"id": 1}),
//!         Some(Box::new(|data| println!("user: {data}"))),
//!     );
//! });
//! ```
//!
//! ## Async waiting with a bound
//!
//! ```ignore
//! use std::time::Duration;
//! use wvb::wait_for_bridge;
//!
//! let bridge = wait_for_bridge(&runtime)
//!     .timeout(Duration::from_secs(5))
//!     .wait()
//!     .await?;
//! bridge.call_handler("trackEvent", serde_json::json!({"name": "open"}), None);
//! ```
//!
//! ## Driving acquisition in tests
//!
//! ```ignore
//! use std::sync::Arc;
//! use wvb::{AcquireConfig, BridgeRuntime, RecordingBridge, SimulatedPage};
//!
//! let page = Arc::new(SimulatedPage::new());
//! let runtime = BridgeRuntime::new(page.clone(), AcquireConfig::new());
//!
//! runtime.register_consumer(|bridge| { /* queued until readiness */ });
//! page.install_bridge(Arc::new(RecordingBridge::new()));
//! page.fire_bridge_ready(); // queue drains here, in order
//! ```

pub mod waiter;

pub use waiter::{BridgeWaiter, DEFAULT_WAIT_TIMEOUT, wait_for_bridge};

// Re-export the acquisition runtime surface
pub use wvb_runtime::{
    AcquireConfig, Bridge, BridgeRuntime, DeferredTask, DiagnosticBridge, EventListener,
    HostBridge, PageEnvironment, RecordingBridge, ResponseCallback, SimulatedPage,
};

// Re-export the handshake wire types for convenience
pub use wvb_protocol::{BRIDGE_LOADED_SRC, HandlerCall, ProbeRequest, READY_EVENT};

pub use wvb_protocol;

pub use wvb_runtime;

// Re-export Error and Result from wvb-runtime
pub use wvb_runtime::{Error, Result};
