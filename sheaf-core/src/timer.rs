//! Timer service abstraction.
//!
//! The collector never sleeps itself; it asks a [`TimerService`] to run a
//! callback later. Implement this trait to plug in any async runtime or a
//! virtual clock.

use std::time::Duration;

/// A deferred action handed to a [`TimerService`].
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Schedules and cancels deferred callbacks.
///
/// Callbacks may run on any thread. `schedule` must not run the callback
/// synchronously: the caller may hold a lock the callback needs.
pub trait TimerService: Send + Sync + 'static {
    /// Handle identifying a scheduled callback.
    type Handle: Send + 'static;

    /// Run `callback` once, after `delay` has elapsed.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Self::Handle;

    /// Prevent a scheduled callback from running.
    ///
    /// Must be a no-op for callbacks that already ran or are running.
    fn cancel(&self, handle: Self::Handle);
}
