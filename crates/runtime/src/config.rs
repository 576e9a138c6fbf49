//! Acquisition configuration.
//!
//! The defaults match the stock `WebViewJavascriptBridge` host libraries.
//! Embedders running a forked host can override the probe URL and the
//! readiness event name; call diagnostics can be switched on either in
//! code or through the environment.

use wvb_protocol::{BRIDGE_LOADED_SRC, ProbeRequest, READY_EVENT};

/// Environment variable that switches call diagnostics on.
pub const DIAGNOSTICS_ENV: &str = "WVB_DIAGNOSTICS";

/// Configuration for bridge acquisition on one page.
#[derive(Debug, Clone)]
pub struct AcquireConfig {
    /// URL the wake-up probe navigates to
    pub probe_src: String,

    /// Document event the host dispatches once the handle is installed
    pub ready_event: String,

    /// Wrap delivered handles in the call-logging decorator
    pub diagnostics: bool,
}

impl AcquireConfig {
    /// Creates the stock configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the stock configuration with environment overrides applied.
    ///
    /// Setting `WVB_DIAGNOSTICS=1` (or `true`) switches the call-logging
    /// decorator on without touching embedder code.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(DIAGNOSTICS_ENV) {
            config.diagnostics = flag_enabled(&value);
        }
        config
    }

    /// Sets the probe URL.
    pub fn probe_src(mut self, src: impl Into<String>) -> Self {
        self.probe_src = src.into();
        self
    }

    /// Sets the readiness event name.
    pub fn ready_event(mut self, event: impl Into<String>) -> Self {
        self.ready_event = event.into();
        self
    }

    /// Switches the call-logging decorator on or off.
    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Builds the probe request for this configuration.
    pub fn probe(&self) -> ProbeRequest {
        ProbeRequest::new(&self.probe_src)
    }
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            probe_src: BRIDGE_LOADED_SRC.to_string(),
            ready_event: READY_EVENT.to_string(),
            diagnostics: false,
        }
    }
}

/// Parses an environment flag value.
fn flag_enabled(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}
