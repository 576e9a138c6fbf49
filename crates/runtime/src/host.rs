//! Page environment seam.
//!
//! The runtime never touches a real document or WebView directly; every
//! page-side effect goes through [`PageEnvironment`]. Embedders back the
//! trait with their WebView's page (DOM mutation, document events, turn
//! scheduling); tests back it with [`SimulatedPage`](crate::sim::SimulatedPage).

use std::sync::Arc;

use wvb_protocol::ProbeRequest;

use crate::handle::HostBridge;

/// Work scheduled for the environment's next scheduler turn.
pub type DeferredTask = Box<dyn FnOnce() + Send>;

/// Callback invoked each time a subscribed document event fires.
pub type EventListener = Box<dyn Fn() + Send + Sync>;

/// Page-side surface the acquisition runtime drives.
///
/// One instance per page context. Methods are plain accessors and
/// mutators: implementations must not call back into the runtime from
/// inside them, and must be callable from whichever thread delivers
/// host events.
pub trait PageEnvironment: Send + Sync + 'static {
    /// Returns the host-injected bridge handle, if one is installed.
    fn installed_handle(&self) -> Option<Arc<dyn HostBridge>>;

    /// Inserts the hidden probe element into the document.
    fn insert_probe(&self, probe: &ProbeRequest);

    /// Removes a previously inserted probe element.
    ///
    /// Removing a probe that is no longer present is a no-op.
    fn remove_probe(&self, probe: &ProbeRequest);

    /// Schedules `task` to run on the next scheduler turn.
    fn defer(&self, task: DeferredTask);

    /// Registers a listener for the named document event.
    ///
    /// The listener stays registered for the life of the page, matching
    /// `document.addEventListener` semantics.
    fn subscribe(&self, event: &str, listener: EventListener);
}
