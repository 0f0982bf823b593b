//! Size- and time-triggered batch collector.
//!
//! A [`BatchCollector`] buffers payloads and hands them to its [`Sink`] as one
//! ordered batch when either trigger fires:
//!
//! - **size**: checked synchronously on every [`accept`](BatchCollector::accept),
//!   so it always wins against a timer that would expire at the same moment.
//! - **timeout**: armed once, by the first message of a window. Later
//!   messages join the window without re-arming it, so the timeout measures
//!   time since the first message rather than inactivity.
//!
//! All state sits behind one mutex per collector. Timer callbacks may run on
//! another thread; each carries the generation of the window it was armed for
//! and does nothing unless that window is still the pending one.

use sheaf_core::{
    BatchConfig, BoxError, CollectorError, ErrorHandler, ShutdownPolicy, Sink, TimerService,
};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

/// Observable state of a collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    /// Nothing buffered, no timer pending.
    Idle,
    /// At least one payload buffered.
    Collecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Size,
    Timeout,
    Shutdown,
}

impl Trigger {
    fn as_str(self) -> &'static str {
        match self {
            Trigger::Size => "size",
            Trigger::Timeout => "timeout",
            Trigger::Shutdown => "shutdown",
        }
    }
}

struct Pending<H> {
    generation: u64,
    handle: H,
}

struct State<T, H> {
    batch: Vec<T>,
    pending: Option<Pending<H>>,
    // Bumped on every release; identifies the current window.
    generation: u64,
    closed: bool,
}

struct Inner<T, S, R: TimerService> {
    config: BatchConfig,
    sink: S,
    timer: R,
    on_error: Option<Box<dyn ErrorHandler>>,
    state: Mutex<State<T, R::Handle>>,
}

/// Collects payloads into batches released by size or by timeout.
///
/// Dropping the collector tears it down (see [`shutdown`](Self::shutdown)).
///
/// # Example
///
/// ```rust,ignore
/// use sheaf_std::{BatchCollector, timer::TokioTimer};
/// use sheaf_core::{BatchConfig, BoxError};
///
/// let collector = BatchCollector::new(
///     BatchConfig::new(2, 10)?,
///     |batch: Vec<&str>| -> Result<(), BoxError> {
///         println!("{batch:?}");
///         Ok(())
///     },
///     TokioTimer::current()?,
/// );
///
/// collector.accept("a")?;
/// collector.accept("b")?; // released here: ["a", "b"]
/// collector.accept("c")?; // released ~10ms later: ["c"]
/// ```
pub struct BatchCollector<T, S, R>
where
    T: Send + 'static,
    S: Sink<T>,
    R: TimerService,
{
    inner: Arc<Inner<T, S, R>>,
}

impl<T, S, R> BatchCollector<T, S, R>
where
    T: Send + 'static,
    S: Sink<T>,
    R: TimerService,
{
    /// Create a collector. Timer-path delivery failures are only logged.
    pub fn new(config: BatchConfig, sink: S, timer: R) -> Self {
        Self::build(config, sink, timer, None)
    }

    /// Create a collector that reports timer-path delivery failures to `handler`.
    pub fn with_error_handler<E: ErrorHandler>(
        config: BatchConfig,
        sink: S,
        timer: R,
        handler: E,
    ) -> Self {
        Self::build(config, sink, timer, Some(Box::new(handler)))
    }

    fn build(
        config: BatchConfig,
        sink: S,
        timer: R,
        on_error: Option<Box<dyn ErrorHandler>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                sink,
                timer,
                on_error,
                state: Mutex::new(State {
                    batch: Vec::new(),
                    pending: None,
                    generation: 0,
                    closed: false,
                }),
            }),
        }
    }

    /// Add a payload to the current batch.
    ///
    /// Releases synchronously if the batch reached the configured size;
    /// otherwise arms the window timer if this is the window's first payload.
    ///
    /// # Errors
    ///
    /// - [`CollectorError::Closed`] after teardown; the payload is dropped.
    /// - [`CollectorError::Delivery`] if the sink rejected a size-triggered
    ///   batch. The collector has already reset when this is returned.
    pub fn accept(&self, payload: T) -> Result<(), CollectorError> {
        let mut state = self.inner.lock();

        if state.closed {
            #[cfg(feature = "tracing")]
            tracing::warn!("payload offered to a collector that has been shut down");
            return Err(CollectorError::Closed);
        }

        state.batch.push(payload);

        if let Some(size) = self.inner.config.batch_size() {
            if state.batch.len() >= size.get() {
                return self
                    .inner
                    .release(&mut state, Trigger::Size)
                    .map_err(CollectorError::Delivery);
            }
        }

        if let Some(timeout) = self.inner.config.timeout() {
            if state.pending.is_none() {
                let generation = state.generation;
                let weak: Weak<Inner<T, S, R>> = Arc::downgrade(&self.inner);
                let handle = self.inner.timer.schedule(
                    timeout,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.on_timer(generation);
                        }
                    }),
                );
                state.pending = Some(Pending { generation, handle });

                #[cfg(feature = "tracing")]
                tracing::debug!(generation, ?timeout, "batch window opened");
            }
        }

        Ok(())
    }

    /// Tear the collector down.
    ///
    /// Cancels the pending timer and applies the configured
    /// [`ShutdownPolicy`]; with the default policy buffered payloads are
    /// dropped without being released. A timer callback that is already
    /// releasing finishes first; one that fires afterwards does nothing.
    /// Calling this more than once is a no-op.
    pub fn shutdown(&self) {
        let mut state = self.inner.lock();
        if state.closed {
            return;
        }
        state.closed = true;

        if let Some(pending) = state.pending.take() {
            self.inner.timer.cancel(pending.handle);
        }

        match self.inner.config.shutdown() {
            ShutdownPolicy::Discard => {
                let dropped = state.batch.len();
                state.batch.clear();
                #[cfg(feature = "tracing")]
                tracing::debug!(dropped, "collector shut down");
                #[cfg(not(feature = "tracing"))]
                let _ = dropped;
            }
            ShutdownPolicy::Flush => {
                if state.batch.is_empty() {
                    return;
                }
                let result = self.inner.release(&mut state, Trigger::Shutdown);
                drop(state);
                if let Err(err) = result {
                    self.inner.report(err);
                }
            }
        }
    }

    /// Number of payloads in the current batch.
    pub fn len(&self) -> usize {
        self.inner.lock().batch.len()
    }

    /// Whether the current batch is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current state of the release state machine.
    pub fn state(&self) -> CollectorState {
        if self.is_empty() {
            CollectorState::Idle
        } else {
            CollectorState::Collecting
        }
    }

    /// Whether a window timer is armed.
    pub fn has_pending_timer(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    /// Whether [`shutdown`](Self::shutdown) has run.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// The collector's configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.inner.config
    }
}

impl<T, S, R> Drop for BatchCollector<T, S, R>
where
    T: Send + 'static,
    S: Sink<T>,
    R: TimerService,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<T, S, R> fmt::Debug for BatchCollector<T, S, R>
where
    T: Send + 'static,
    S: Sink<T>,
    R: TimerService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("BatchCollector")
            .field("config", &self.inner.config)
            .field("buffered", &state.batch.len())
            .field("pending_timer", &state.pending.is_some())
            .field("closed", &state.closed)
            .finish()
    }
}

impl<T, S, R> Inner<T, S, R>
where
    T: Send + 'static,
    S: Sink<T>,
    R: TimerService,
{
    fn lock(&self) -> MutexGuard<'_, State<T, R::Handle>> {
        // The state is reset before the sink runs, so a panicking sink
        // cannot leave it half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the whole batch, reset, then emit. Caller holds the lock.
    fn release(&self, state: &mut State<T, R::Handle>, trigger: Trigger) -> Result<(), BoxError> {
        let batch = std::mem::take(&mut state.batch);
        state.generation = state.generation.wrapping_add(1);
        if let Some(pending) = state.pending.take() {
            self.timer.cancel(pending.handle);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            trigger = trigger.as_str(),
            size = batch.len(),
            "releasing batch"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = trigger.as_str();

        self.sink.release(batch).inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(trigger = trigger.as_str(), error = %_err, "batch delivery failed");
        })
    }

    fn on_timer(&self, generation: u64) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        match &state.pending {
            Some(pending) if pending.generation == generation => {}
            // Window already released by size or by an earlier timer.
            _ => return,
        }

        let result = self.release(&mut state, Trigger::Timeout);
        drop(state);
        if let Err(err) = result {
            self.report(err);
        }
    }

    fn report(&self, err: BoxError) {
        if let Some(handler) = &self.on_error {
            handler.on_error(err);
        }
    }
}
