//! In-memory host simulation.
//!
//! Test doubles for the two seams the runtime drives:
//!
//! - [`SimulatedPage`]: a [`PageEnvironment`] with a handle slot, a probe
//!   list, document event listeners, and a manually pumped scheduler
//!   ([`run_turn`](SimulatedPage::run_turn))
//! - [`RecordingBridge`]: a [`HostBridge`] playing the native side,
//!   recording marshaled calls and delivering canned responses on demand
//!
//! Both are ordinary library types rather than `#[cfg(test)]` items so
//! embedders can drive acquisition in their own tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde_json::Value;

use wvb_protocol::{HandlerCall, ProbeRequest, READY_EVENT};

use crate::handle::{HostBridge, ResponseCallback};
use crate::host::{DeferredTask, EventListener, PageEnvironment};

/// An in-memory page environment with a manually pumped scheduler.
///
/// Nothing runs spontaneously: deferred tasks wait for
/// [`run_turn`](Self::run_turn) and document events wait for
/// [`fire_event`](Self::fire_event), so tests control interleaving
/// exactly.
#[derive(Default)]
pub struct SimulatedPage {
    installed: Mutex<Option<Arc<dyn HostBridge>>>,
    probes: Mutex<Vec<ProbeRequest>>,
    tasks: Mutex<VecDeque<DeferredTask>>,
    listeners: Mutex<Vec<(String, Arc<dyn Fn() + Send + Sync>)>>,
}

impl SimulatedPage {
    /// Creates an empty page: no handle, no probes, no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the native-injected bridge handle.
    pub fn install_bridge(&self, bridge: Arc<dyn HostBridge>) {
        *self.installed.lock() = Some(bridge);
    }

    /// Dispatches a named document event to all matching listeners.
    ///
    /// Returns how many listeners fired. Listeners run outside the
    /// registry lock, so they may subscribe or fire further events.
    pub fn fire_event(&self, event: &str) -> usize {
        let matching: Vec<_> = self
            .listeners
            .lock()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in &matching {
            listener();
        }
        matching.len()
    }

    /// Dispatches the stock readiness event.
    pub fn fire_bridge_ready(&self) -> usize {
        self.fire_event(READY_EVENT)
    }

    /// Runs one scheduler turn and returns how many tasks ran.
    ///
    /// Only tasks queued before the call run; tasks they enqueue wait for
    /// the next turn, matching `setTimeout(..., 0)` semantics.
    pub fn run_turn(&self) -> usize {
        let batch: VecDeque<DeferredTask> = std::mem::take(&mut *self.tasks.lock());
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    /// Probe elements currently in the document.
    pub fn probes(&self) -> Vec<ProbeRequest> {
        self.probes.lock().clone()
    }

    /// Number of tasks scheduled but not yet run.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Number of registered document event listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl PageEnvironment for SimulatedPage {
    fn installed_handle(&self) -> Option<Arc<dyn HostBridge>> {
        self.installed.lock().clone()
    }

    fn insert_probe(&self, probe: &ProbeRequest) {
        self.probes.lock().push(probe.clone());
    }

    fn remove_probe(&self, probe: &ProbeRequest) {
        self.probes.lock().retain(|p| p != probe);
    }

    fn defer(&self, task: DeferredTask) {
        self.tasks.lock().push_back(task);
    }

    fn subscribe(&self, event: &str, listener: EventListener) {
        self.listeners
            .lock()
            .push((event.to_string(), Arc::from(listener)));
    }
}

/// Recording implementation of the native side of the bridge.
///
/// Marshals every [`call_handler`](HostBridge::call_handler) into a
/// [`HandlerCall`] envelope the way the host libraries do: calls carrying
/// a response callback get a fresh correlation id, and the callback is
/// parked until the test delivers the response via
/// [`respond`](Self::respond).
pub struct RecordingBridge {
    supports_init: bool,
    calls: Mutex<Vec<HandlerCall>>,
    parked: Mutex<HashMap<String, ResponseCallback>>,
    next_callback: AtomicU64,
    init_hits: AtomicUsize,
}

impl RecordingBridge {
    /// A bridge whose host object exposes `init`.
    pub fn new() -> Self {
        Self {
            supports_init: true,
            calls: Mutex::new(Vec::new()),
            parked: Mutex::new(HashMap::new()),
            next_callback: AtomicU64::new(0),
            init_hits: AtomicUsize::new(0),
        }
    }

    /// A bridge modeling host generations that predate `init`.
    pub fn without_init() -> Self {
        Self {
            supports_init: false,
            ..Self::new()
        }
    }

    /// Calls marshaled so far, in invocation order.
    pub fn calls(&self) -> Vec<HandlerCall> {
        self.calls.lock().clone()
    }

    /// How many times `init` reached the host object.
    pub fn init_calls(&self) -> usize {
        self.init_hits.load(Ordering::SeqCst)
    }

    /// Number of response callbacks parked and awaiting delivery.
    pub fn pending_responses(&self) -> usize {
        self.parked.lock().len()
    }

    /// Delivers the native response for `callback_id`.
    ///
    /// Returns `false` when the id is unknown or was already answered.
    pub fn respond(&self, callback_id: &str, data: Value) -> bool {
        let Some(callback) = self.parked.lock().remove(callback_id) else {
            return false;
        };
        callback(data);
        true
    }
}

impl Default for RecordingBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl HostBridge for RecordingBridge {
    fn call_handler(&self, message_type: &str, payload: Value, response: Option<ResponseCallback>) {
        let mut call = HandlerCall::new(message_type, payload);
        if let Some(callback) = response {
            let id = format!("cb_{}", self.next_callback.fetch_add(1, Ordering::SeqCst) + 1);
            self.parked.lock().insert(id.clone(), callback);
            call = call.callback_id(id);
        }
        self.calls.lock().push(call);
    }

    fn has_init(&self) -> bool {
        self.supports_init
    }

    fn init(&self) {
        self.init_hits.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_turn_only_runs_the_current_batch() {
        let page = Arc::new(SimulatedPage::new());
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let inner_log = log.clone();
        let inner_page = page.clone();
        page.defer(Box::new(move || {
            inner_log.lock().push("first");
            let chained_log = inner_log.clone();
            inner_page.defer(Box::new(move || chained_log.lock().push("second")));
        }));

        assert_eq!(page.run_turn(), 1);
        assert_eq!(log.lock().as_slice(), &["first"]);
        assert_eq!(page.run_turn(), 1);
        assert_eq!(log.lock().as_slice(), &["first", "second"]);
    }

    #[test]
    fn fire_event_only_reaches_matching_listeners() {
        let page = SimulatedPage::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        page.subscribe("bridgeUp", Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(page.fire_event("somethingElse"), 0);
        assert_eq!(page.fire_event("bridgeUp"), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn probe_insert_and_remove_round_trip() {
        let page = SimulatedPage::new();
        let probe = ProbeRequest::default();

        page.insert_probe(&probe);
        assert_eq!(page.probes().len(), 1);

        page.remove_probe(&probe);
        assert!(page.probes().is_empty());

        // Removing again is a no-op.
        page.remove_probe(&probe);
        assert!(page.probes().is_empty());
    }

    #[test]
    fn recording_bridge_assigns_unique_correlation_ids() {
        let bridge = RecordingBridge::new();

        bridge.call_handler("a", Value::Null, Some(Box::new(|_| {})));
        bridge.call_handler("b", Value::Null, Some(Box::new(|_| {})));

        let calls = bridge.calls();
        assert_eq!(calls[0].callback_id.as_deref(), Some("cb_1"));
        assert_eq!(calls[1].callback_id.as_deref(), Some("cb_2"));
        assert_eq!(bridge.pending_responses(), 2);
    }

    #[test]
    fn respond_routes_once_and_only_once() {
        let bridge = RecordingBridge::new();
        let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bridge.call_handler(
            "getUserInfo",
            json!({"id": 1}),
            Some(Box::new(move |data| sink.lock().push(data))),
        );

        let id = bridge.calls()[0].callback_id.clone().unwrap();
        assert!(bridge.respond(&id, json!({"name": "ada"})));
        assert!(!bridge.respond(&id, json!({"name": "ada"})));
        assert!(!bridge.respond("cb_999", Value::Null));
        assert_eq!(seen.lock().as_slice(), &[json!({"name": "ada"})]);
    }
}
