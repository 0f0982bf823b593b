//! Testing utilities for Sheaf.
//!
//! This module provides utilities to make testing collectors, aggregators and
//! sinks deterministic.
//!
//! # Features
//!
//! - [`ManualTimer`]: A virtual clock implementing [`TimerService`]
//! - [`RecordingSink`]: A sink that records every released batch
//! - [`FailingSink`]: A sink that rejects every batch
//! - [`RecordingErrorHandler`]: An error handler that records failures
//! - [`CountingHandler`]: An async handler that counts invocations

use sheaf_core::{BoxError, ErrorHandler, Handler, Message, Sink, TimerCallback, TimerService};
use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

// ============================================================================
// Manual Timer
// ============================================================================

struct Scheduled {
    id: u64,
    due: Duration,
    callback: TimerCallback,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    scheduled: Vec<Scheduled>,
}

/// A virtual clock that only moves when told to.
///
/// Callbacks run on the thread calling [`advance`](Self::advance), in due
/// order, with the clock set to their due time.
///
/// # Example
///
/// ```rust,ignore
/// let timer = ManualTimer::new();
/// let collector = BatchCollector::new(BatchConfig::millis(10)?, sink.clone(), timer.clone());
///
/// collector.accept(1)?;
/// timer.advance(Duration::from_millis(10));
/// assert_eq!(sink.batches(), vec![vec![1]]);
/// ```
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Arc<Mutex<Clock>>,
}

/// Handle of a callback scheduled on a [`ManualTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualTimerHandle(u64);

impl ManualTimer {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn clock(&self) -> MutexGuard<'_, Clock> {
        lock(&self.clock)
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.clock().now
    }

    /// Number of callbacks waiting to fire.
    pub fn pending(&self) -> usize {
        self.clock().scheduled.len()
    }

    /// Move the clock forward, firing every callback that comes due.
    ///
    /// Returns the number of callbacks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut clock = self.clock();
                let due = clock
                    .scheduled
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due <= target)
                    .min_by_key(|(_, s)| (s.due, s.id))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let scheduled = clock.scheduled.remove(index);
                    clock.now = scheduled.due;
                    scheduled.callback
                })
            };

            // Run outside the clock lock so callbacks may schedule or cancel.
            match next {
                Some(callback) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        self.clock().now = target;
        fired
    }
}

impl TimerService for ManualTimer {
    type Handle = ManualTimerHandle;

    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Self::Handle {
        let mut clock = self.clock();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.scheduled.push(Scheduled { id, due, callback });
        ManualTimerHandle(id)
    }

    fn cancel(&self, handle: Self::Handle) {
        self.clock().scheduled.retain(|s| s.id != handle.0);
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Recording Sink
// ============================================================================

/// A sink that records all batches it receives.
///
/// Clones share the same record.
pub struct RecordingSink<T> {
    batches: Arc<Mutex<Vec<Vec<T>>>>,
}

impl<T> RecordingSink<T> {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self {
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded batches.
    pub fn batches(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        lock(&self.batches).clone()
    }

    /// Get the number of recorded batches.
    pub fn count(&self) -> usize {
        lock(&self.batches).len()
    }

    /// Clear all recorded batches.
    pub fn clear(&self) {
        lock(&self.batches).clear();
    }
}

impl<T> Default for RecordingSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingSink<T> {
    fn clone(&self) -> Self {
        Self {
            batches: self.batches.clone(),
        }
    }
}

impl<T: Send + 'static> Sink<T> for RecordingSink<T> {
    fn release(&self, batch: Vec<T>) -> Result<(), BoxError> {
        lock(&self.batches).push(batch);
        Ok(())
    }
}

// ============================================================================
// Failing Sink
// ============================================================================

/// A sink that rejects every batch with `"sink unavailable"`.
#[derive(Clone, Default)]
pub struct FailingSink {
    attempts: Arc<AtomicUsize>,
}

impl FailingSink {
    /// Create a new failing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches offered to this sink.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl<T> Sink<T> for FailingSink {
    fn release(&self, _batch: Vec<T>) -> Result<(), BoxError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err("sink unavailable".into())
    }
}

// ============================================================================
// Recording Error Handler
// ============================================================================

/// An error handler that records error messages.
#[derive(Clone, Default)]
pub struct RecordingErrorHandler {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingErrorHandler {
    /// Create a new recording error handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded error messages.
    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }

    /// Get the number of recorded errors.
    pub fn count(&self) -> usize {
        lock(&self.messages).len()
    }
}

impl ErrorHandler for RecordingErrorHandler {
    fn on_error(&self, error: BoxError) {
        lock(&self.messages).push(error.to_string());
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and the items it saw.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// forward_to_handler(stream, counter.clone()).await;
/// assert_eq!(counter.count(), 2);
/// ```
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
    items: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of calls.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Get the total number of items across all batches.
    pub fn items(&self) -> usize {
        self.items.load(Ordering::SeqCst)
    }

    /// Reset the counters.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
        self.items.store(0, Ordering::SeqCst);
    }
}

impl<T: Message> Handler<Vec<T>> for CountingHandler {
    type Output = ();

    async fn call(&self, input: Vec<T>) -> Self::Output {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.items.fetch_add(input.len(), Ordering::SeqCst);
    }
}
