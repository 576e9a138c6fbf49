//! Waiting-side API for bridge acquisition.
//!
//! [`BridgeRuntime::register_consumer`] is callback-shaped, matching the
//! host libraries it speaks to. [`wait_for_bridge`] adapts that to async
//! code: the returned [`BridgeWaiter`] resolves when the handle is
//! delivered, and can either bound the wait or suspend indefinitely.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::oneshot;

use wvb_runtime::{Bridge, BridgeRuntime, Error, Result};

/// Default bound for [`BridgeWaiter::wait`].
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Registers a consumer on `runtime` and exposes the delivery as a future.
///
/// Acquisition semantics are unchanged: when the handle is already cached
/// the returned waiter resolves before this function returns, and a host
/// that never answers leaves it pending forever unless the wait is
/// bounded via [`BridgeWaiter::wait`].
pub fn wait_for_bridge(runtime: &BridgeRuntime) -> BridgeWaiter {
    let (complete_tx, complete_rx) = oneshot::channel();
    runtime.register_consumer(move |bridge| {
        let _ = complete_tx.send(bridge);
    });
    BridgeWaiter {
        rx: complete_rx,
        timeout: DEFAULT_WAIT_TIMEOUT,
    }
}

/// One-shot bridge delivery with timeout support.
///
/// Created by [`wait_for_bridge`]. Supports two consumption patterns:
///
/// - **With timeout**: Call [`wait()`](Self::wait) for timeout support
/// - **Without timeout**: Use `.await` directly (implements [`Future`])
///
/// # Example
///
/// ```ignore
/// let bridge = wait_for_bridge(&runtime)
///     .timeout(Duration::from_secs(5))
///     .wait()
///     .await?;
/// bridge.call_handler("getUserInfo", json!({"id": 1}), None);
/// ```
pub struct BridgeWaiter {
    rx: oneshot::Receiver<Bridge>,
    timeout: Duration,
}

impl BridgeWaiter {
    /// Overrides the timeout used by [`wait()`](Self::wait).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Waits for delivery with the configured timeout.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if the host has not delivered within the bound
    /// - [`Error::ChannelClosed`] if the runtime is dropped while waiting
    pub async fn wait(self) -> Result<Bridge> {
        tokio::time::timeout(self.timeout, self.rx)
            .await
            .map_err(|_| Error::Timeout("Timeout waiting for bridge delivery".to_string()))?
            .map_err(|_| Error::ChannelClosed)
    }
}

impl Future for BridgeWaiter {
    type Output = Result<Bridge>;

    /// Polls the waiter without timeout. For timeout support, use [`wait()`](Self::wait).
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(bridge)) => Poll::Ready(Ok(bridge)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(Error::ChannelClosed)),
            Poll::Pending => Poll::Pending,
        }
    }
}
