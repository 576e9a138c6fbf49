//! Bridge acquisition state machine.
//!
//! A page that wants to talk to its WebView host needs the bridge handle
//! the host injects, but hosts differ in when (and how) they inject it.
//! [`BridgeRuntime`] hides that dance behind one operation:
//! [`register_consumer`](BridgeRuntime::register_consumer).
//!
//! Acquisition moves through three phases:
//!
//! 1. **Idle**: nobody has asked for the bridge yet.
//! 2. **Acquiring**: the first registration found no installed handle, so
//!    the runtime inserted the hidden wake-up probe (removed again on the
//!    next scheduler turn), subscribed to the readiness event, and queued
//!    the consumer. Later registrations append to the queue in order.
//! 3. **Ready**: the handle is normalized and cached; the queue was
//!    drained exactly once in FIFO order, and every later registration is
//!    delivered synchronously in the same call.
//!
//! The handshake is fire-and-hope, exactly like the host libraries it
//! speaks to: there are no retries and no deadline, and a host that never
//! answers leaves consumers queued forever. Readiness signals past the
//! first are ignored, as is a readiness event from a host that forgot to
//! install the handle first.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::AcquireConfig;
use crate::diagnostics::DiagnosticBridge;
use crate::handle::{Bridge, HostBridge};
use crate::host::PageEnvironment;

/// A queued bridge consumer.
type Consumer = Box<dyn FnOnce(Bridge) + Send>;

enum Phase {
    /// No consumer has registered yet.
    Idle,
    /// Probe inserted, readiness subscription live, consumers queued.
    Acquiring { pending: Vec<Consumer> },
    /// Handle cached; delivery is synchronous from here on.
    Ready { bridge: Bridge },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Acquiring { .. } => "acquiring",
            Phase::Ready { .. } => "ready",
        }
    }
}

/// Owning context for bridge acquisition on one page.
///
/// Cheap to clone; clones share phase, queue, and the delivered handle.
/// Each page context gets its own runtime, nothing is process-global.
#[derive(Clone)]
pub struct BridgeRuntime {
    inner: Arc<Inner>,
}

struct Inner {
    env: Arc<dyn PageEnvironment>,
    config: AcquireConfig,
    phase: Mutex<Phase>,
}

impl BridgeRuntime {
    /// Creates a runtime over the given page environment.
    pub fn new(env: Arc<dyn PageEnvironment>, config: AcquireConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                env,
                config,
                phase: Mutex::new(Phase::Idle),
            }),
        }
    }

    /// Registers `consumer` to receive the bridge handle.
    ///
    /// If the handle is already cached, or the host installed it before
    /// anyone asked, `consumer` runs synchronously before this call
    /// returns. Otherwise the first registration starts the handshake
    /// (probe plus readiness subscription) and `consumer` joins a queue
    /// that is drained in registration order when the host signals
    /// readiness.
    ///
    /// There is no failure path: a host that never answers simply never
    /// invokes `consumer`.
    pub fn register_consumer(&self, consumer: impl FnOnce(Bridge) + Send + 'static) {
        self.inner.register(Box::new(consumer));
    }

    /// Returns the delivered handle if acquisition already completed.
    pub fn try_bridge(&self) -> Option<Bridge> {
        match &*self.inner.phase.lock() {
            Phase::Ready { bridge } => Some(bridge.clone()),
            _ => None,
        }
    }

    /// Whether the handle has been delivered and cached.
    pub fn is_ready(&self) -> bool {
        matches!(&*self.inner.phase.lock(), Phase::Ready { .. })
    }

    /// Number of consumers queued and not yet delivered to.
    pub fn pending_consumers(&self) -> usize {
        match &*self.inner.phase.lock() {
            Phase::Acquiring { pending } => pending.len(),
            _ => 0,
        }
    }

    /// The configuration this runtime was built with.
    pub fn config(&self) -> &AcquireConfig {
        &self.inner.config
    }
}

impl std::fmt::Debug for BridgeRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = self.inner.phase.lock();
        let pending = match &*phase {
            Phase::Acquiring { pending } => pending.len(),
            _ => 0,
        };
        f.debug_struct("BridgeRuntime")
            .field("phase", &phase.name())
            .field("pending", &pending)
            .finish()
    }
}

impl Inner {
    fn register(self: &Arc<Self>, consumer: Consumer) {
        let mut phase = self.phase.lock();
        match &mut *phase {
            Phase::Ready { bridge } => {
                let bridge = bridge.clone();
                drop(phase);
                tracing::debug!("bridge ready; delivering to consumer synchronously");
                consumer(bridge);
            }
            Phase::Acquiring { pending } => {
                pending.push(consumer);
                tracing::debug!(queued = pending.len(), "bridge not ready; consumer queued");
            }
            Phase::Idle => {
                if let Some(raw) = self.env.installed_handle() {
                    let bridge = self.deliverable(raw);
                    *phase = Phase::Ready {
                        bridge: bridge.clone(),
                    };
                    drop(phase);
                    tracing::debug!("bridge already installed; delivering synchronously");
                    consumer(bridge);
                } else {
                    *phase = Phase::Acquiring {
                        pending: vec![consumer],
                    };
                    drop(phase);
                    self.begin_handshake();
                }
            }
        }
    }

    /// Pokes the host awake and arranges to hear back from it.
    ///
    /// Runs once, on the Idle -> Acquiring transition. The probe element
    /// is what legacy iOS hosts watch for; the readiness event is how
    /// every generation announces the installed handle. Both closures
    /// hold weak references so a dropped runtime (or page) costs nothing.
    fn begin_handshake(self: &Arc<Self>) {
        let probe = self.config.probe();
        self.env.insert_probe(&probe);
        tracing::debug!(src = %probe.src, "probe inserted; removal scheduled for next turn");

        let env = Arc::downgrade(&self.env);
        self.env.defer(Box::new(move || {
            if let Some(env) = env.upgrade() {
                env.remove_probe(&probe);
            }
        }));

        let inner = Arc::downgrade(self);
        self.env.subscribe(
            &self.config.ready_event,
            Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.handle_ready();
                }
            }),
        );
        tracing::debug!(event = %self.config.ready_event, "listening for bridge readiness");
    }

    fn handle_ready(&self) {
        let Some(raw) = self.env.installed_handle() else {
            tracing::warn!("readiness event fired but no bridge handle is installed; ignoring");
            return;
        };

        let mut phase = self.phase.lock();
        let pending = match &mut *phase {
            Phase::Acquiring { pending } => std::mem::take(pending),
            Phase::Ready { .. } => {
                tracing::debug!("duplicate readiness event ignored");
                return;
            }
            Phase::Idle => {
                tracing::debug!("readiness event before first registration ignored");
                return;
            }
        };
        let bridge = self.deliverable(raw);
        *phase = Phase::Ready {
            bridge: bridge.clone(),
        };
        drop(phase);

        tracing::debug!(consumers = pending.len(), "bridge ready; draining queue");
        for consumer in pending {
            consumer(bridge.clone());
        }
    }

    /// Wraps a raw host object into the handle consumers receive.
    fn deliverable(&self, raw: Arc<dyn HostBridge>) -> Bridge {
        let raw = if self.config.diagnostics {
            Arc::new(DiagnosticBridge::new(raw)) as Arc<dyn HostBridge>
        } else {
            raw
        };
        Bridge::normalize(raw)
    }
}
