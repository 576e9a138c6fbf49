//! Host handshake surface: the wake-up probe and the readiness event.
//!
//! Older iOS hosts learn that a page wants the bridge by intercepting a
//! navigation to a reserved URL; once the native side has injected the
//! bridge handle it announces readiness by dispatching a document event.
//! Both halves of that handshake are described here.

use serde::{Deserialize, Serialize};

/// Reserved URL a probe element navigates to.
///
/// Hosts watch for this load, swallow it, and respond by injecting the
/// bridge handle into the page.
pub const BRIDGE_LOADED_SRC: &str = "https://__bridge_loaded__";

/// Document event the host dispatches once the bridge handle is installed.
pub const READY_EVENT: &str = "WebViewJavascriptBridgeReady";

/// A request to insert a hidden navigational element into the document.
///
/// The element exists only to trigger a load of [`BRIDGE_LOADED_SRC`]; it
/// renders nothing and is removed again on the next scheduler turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRequest {
    /// URL the element navigates to
    pub src: String,

    /// Whether the element must be kept out of layout (`display: none`)
    pub hidden: bool,
}

impl ProbeRequest {
    /// Creates a hidden probe for the given URL.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            hidden: true,
        }
    }
}

impl Default for ProbeRequest {
    fn default() -> Self {
        Self::new(BRIDGE_LOADED_SRC)
    }
}
