//! # Release callback
//!
//! A [`Sink`] receives every released batch. It is called synchronously
//! while the collector holds its lock, which is what keeps emission and the
//! accumulator reset atomic with respect to newly arriving messages. A sink
//! must therefore return quickly and must never call back into the collector
//! that owns it.
//!
//! Closures of the form `Fn(Vec<T>) -> Result<(), BoxError>` are sinks.

use crate::error::BoxError;

/// Downstream receiver of released batches.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Sink` for batches of `{T}`",
    label = "missing `Sink<{T}>` implementation",
    note = "Sinks must implement `release(Vec<{T}>)`; closures `Fn(Vec<{T}>) -> Result<(), BoxError>` qualify."
)]
pub trait Sink<T>: Send + Sync + 'static {
    /// Emit one released batch, in arrival order.
    ///
    /// An error does not give the batch back: the collector has already
    /// reset, delivery is at most once.
    fn release(&self, batch: Vec<T>) -> Result<(), BoxError>;
}

impl<T, F> Sink<T> for F
where
    F: Fn(Vec<T>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn release(&self, batch: Vec<T>) -> Result<(), BoxError> {
        (self)(batch)
    }
}

/// Receiver of delivery failures that have no caller to return to.
///
/// Size-triggered releases report failures from `accept`; releases driven by
/// the timer or by a flushing shutdown report them here instead.
pub trait ErrorHandler: Send + Sync + 'static {
    /// Called once per failed delivery.
    fn on_error(&self, error: BoxError);
}

impl<F> ErrorHandler for F
where
    F: Fn(BoxError) + Send + Sync + 'static,
{
    fn on_error(&self, error: BoxError) {
        (self)(error)
    }
}
