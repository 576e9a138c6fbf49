//! Call diagnostics decorator.
//!
//! [`DiagnosticBridge`] wraps a [`HostBridge`] and logs every handler
//! invocation and every response at debug level. It changes nothing else:
//! payload shapes, callback presence, ordering, and timing are exactly
//! those of the wrapped object. Switched on per runtime via
//! [`AcquireConfig::diagnostics`](crate::AcquireConfig) or the
//! `WVB_DIAGNOSTICS` environment variable.

use std::sync::Arc;

use serde_json::Value;

use crate::handle::{HostBridge, ResponseCallback};

/// Logging decorator over a raw host bridge.
pub struct DiagnosticBridge {
    inner: Arc<dyn HostBridge>,
}

impl DiagnosticBridge {
    /// Wraps `inner`, logging its calls and responses.
    pub fn new(inner: Arc<dyn HostBridge>) -> Self {
        Self { inner }
    }

    /// The wrapped host object.
    pub fn inner(&self) -> &Arc<dyn HostBridge> {
        &self.inner
    }
}

impl HostBridge for DiagnosticBridge {
    fn call_handler(&self, message_type: &str, payload: Value, response: Option<ResponseCallback>) {
        tracing::debug!(handler = message_type, payload = %payload, "calling host handler");
        let response = response.map(|callback| {
            let handler = message_type.to_string();
            Box::new(move |data: Value| {
                tracing::debug!(handler = %handler, response = %data, "host handler responded");
                callback(data);
            }) as ResponseCallback
        });
        self.inner.call_handler(message_type, payload, response);
    }

    fn has_init(&self) -> bool {
        self.inner.has_init()
    }

    fn init(&self) {
        tracing::debug!("calling host init");
        self.inner.init();
    }
}
