//! Bridge handle types.
//!
//! [`HostBridge`] is the capability surface of the object a WebView host
//! injects into the page; [`Bridge`] is the normalized handle the runtime
//! delivers to consumers. Normalization happens exactly once, when the
//! handle is first cached: clones of a [`Bridge`] share the decision.

use std::sync::Arc;

use downcast_rs::{DowncastSync, impl_downcast};
use serde_json::Value;

/// Response callback for a host handler invocation.
///
/// Invoked at most once, whenever the native side produces the response.
/// There is no delivery deadline; a silent host simply never invokes it.
pub type ResponseCallback = Box<dyn FnOnce(Value) + Send>;

/// Capability surface of a host-injected bridge object.
///
/// Embedders implement this over the real injected object (or a native
/// proxy for it); tests use [`RecordingBridge`](crate::sim::RecordingBridge).
/// Payloads pass through as opaque [`Value`]s; the runtime never inspects
/// or reshapes them.
pub trait HostBridge: DowncastSync {
    /// Invokes a named handler on the native side.
    ///
    /// When `response` is supplied the native side may invoke it once with
    /// the handler's reply.
    fn call_handler(&self, message_type: &str, payload: Value, response: Option<ResponseCallback>);

    /// Whether the host object exposes the legacy `init` entry point.
    fn has_init(&self) -> bool;

    /// Legacy initialization entry point.
    ///
    /// Only invoked when [`has_init`](Self::has_init) returned true;
    /// implementations without one may leave this empty.
    fn init(&self);
}

impl_downcast!(sync HostBridge);

/// Resolved `init` behavior for a delivered handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitSupport {
    /// Host object exposes `init`; forward to it.
    Host,
    /// Host object predates `init`; calls are absorbed.
    Stubbed,
}

/// Normalized bridge handle delivered to consumers.
///
/// Wraps the raw host object (behind [`DiagnosticBridge`] when diagnostics
/// are on) and smooths over host-generation differences: hosts that
/// predate the `init` entry point get a no-op stub, so consumer code can
/// call [`init`](Self::init) unconditionally.
///
/// [`DiagnosticBridge`]: crate::diagnostics::DiagnosticBridge
#[derive(Clone)]
pub struct Bridge {
    raw: Arc<dyn HostBridge>,
    init: InitSupport,
}

impl Bridge {
    /// Wraps a raw host object, deciding `init` support once.
    pub(crate) fn normalize(raw: Arc<dyn HostBridge>) -> Self {
        let init = if raw.has_init() {
            InitSupport::Host
        } else {
            tracing::debug!("host bridge predates init; stubbing it out");
            InitSupport::Stubbed
        };
        Self { raw, init }
    }

    /// Invokes a named handler on the native side.
    ///
    /// The payload and the optional response callback pass through to the
    /// host object unchanged.
    pub fn call_handler(
        &self,
        message_type: &str,
        payload: Value,
        response: Option<ResponseCallback>,
    ) {
        self.raw.call_handler(message_type, payload, response);
    }

    /// Legacy initialization entry point.
    ///
    /// Forwards to the host object when it has one and does nothing
    /// otherwise, so callers written against older hosts keep working.
    pub fn init(&self) {
        match self.init {
            InitSupport::Host => self.raw.init(),
            InitSupport::Stubbed => {}
        }
    }

    /// Whether [`init`](Self::init) forwards to the host object.
    pub fn init_forwards(&self) -> bool {
        self.init == InitSupport::Host
    }

    /// The wrapped host object.
    ///
    /// This is the diagnostics decorator when diagnostics are on; downcast
    /// through it to reach the concrete host type.
    pub fn raw(&self) -> &Arc<dyn HostBridge> {
        &self.raw
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("init", &self.init)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RecordingBridge;
    use serde_json::json;

    #[test]
    fn init_forwards_on_modern_hosts() {
        let host = Arc::new(RecordingBridge::new());
        let bridge = Bridge::normalize(host.clone());

        bridge.init();
        bridge.init();

        assert!(bridge.init_forwards());
        assert_eq!(host.init_calls(), 2);
    }

    #[test]
    fn init_is_stubbed_on_legacy_hosts() {
        let host = Arc::new(RecordingBridge::without_init());
        let bridge = Bridge::normalize(host.clone());

        bridge.init();

        assert!(!bridge.init_forwards());
        assert_eq!(host.init_calls(), 0);
    }

    #[test]
    fn clones_share_the_normalization_decision() {
        let host = Arc::new(RecordingBridge::without_init());
        let bridge = Bridge::normalize(host);
        let clone = bridge.clone();

        assert!(!clone.init_forwards());
    }

    #[test]
    fn call_handler_passes_through() {
        let host = Arc::new(RecordingBridge::new());
        let bridge = Bridge::normalize(host.clone());

        bridge.call_handler("openCamera", json!({"facing": "front"}), None);

        let calls = host.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].handler_name, "openCamera");
        assert_eq!(calls[0].data, json!({"facing": "front"}));
        assert!(!calls[0].expects_response());
    }

    #[test]
    fn raw_handle_downcasts_to_the_host_type() {
        let host = Arc::new(RecordingBridge::new());
        let bridge = Bridge::normalize(host);

        assert!(bridge.raw().downcast_ref::<RecordingBridge>().is_some());
    }
}
