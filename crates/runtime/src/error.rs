//! Error types for the bridge runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while waiting on bridge acquisition.
///
/// Acquisition itself never fails: the handshake is fire-and-hope, and a
/// host that stays silent simply leaves consumers queued. Errors only
/// surface on the waiting side, when a caller bounds the wait or the
/// owning runtime goes away.
#[derive(Debug, Error)]
pub enum Error {
    /// Timeout waiting for the host to install the bridge.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Channel closed unexpectedly.
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

impl Error {
    /// Returns true if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}
