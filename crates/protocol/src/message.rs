//! Handler invocation envelope.
//!
//! When page code calls a registered host handler, the host library marshals
//! the call into a JSON envelope and hands it to the native side. The shape
//! here mirrors that envelope so simulated and real hosts agree on it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single host-handler invocation as marshaled for the native side.
///
/// `callback_id` is assigned by the host library when the caller supplied a
/// response callback; the native side echoes it back so the response can be
/// routed to the right closure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerCall {
    /// Name the handler was registered under on the native side
    pub handler_name: String,

    /// Opaque payload passed through untouched (a null payload is omitted
    /// on the wire, matching the host library's JSON marshaling)
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,

    /// Correlation id for the response, present only when the caller
    /// expects one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<String>,
}

impl HandlerCall {
    /// Creates an envelope for a fire-and-forget invocation.
    pub fn new(handler_name: impl Into<String>, data: Value) -> Self {
        Self {
            handler_name: handler_name.into(),
            data,
            callback_id: None,
        }
    }

    /// Sets the response correlation id.
    pub fn callback_id(mut self, id: impl Into<String>) -> Self {
        self.callback_id = Some(id.into());
        self
    }

    /// Whether the caller expects a response for this invocation.
    pub fn expects_response(&self) -> bool {
        self.callback_id.is_some()
    }
}
