//! Tokio-backed timer service.
//!
//! **Note**: This module requires the `tokio` feature. For other runtimes,
//! implement [`TimerService`] over your runtime's sleep and task facilities.

use sheaf_core::{CollectorError, TimerCallback, TimerService};
use std::time::Duration;
use tokio::{runtime::Handle, task::JoinHandle};

/// A [`TimerService`] that spawns one sleeping task per armed window.
///
/// Cancelling aborts the task. A task that is already running its callback
/// is not interrupted: the callback is synchronous, so it runs to completion.
///
/// # Example
///
/// ```rust,ignore
/// use sheaf_std::timer::TokioTimer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), sheaf_core::CollectorError> {
///     let timer = TokioTimer::current()?;
///     // hand it to a BatchCollector...
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TokioTimer {
    handle: Handle,
}

impl TokioTimer {
    /// Use the runtime the caller is running in.
    ///
    /// Fails with [`CollectorError::NoRuntime`] outside a tokio runtime.
    pub fn current() -> Result<Self, CollectorError> {
        Handle::try_current()
            .map(Self::with_handle)
            .map_err(|e| CollectorError::NoRuntime(e.to_string()))
    }

    /// Use an explicit runtime handle.
    pub fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl TimerService for TokioTimer {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Self::Handle {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        })
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}
