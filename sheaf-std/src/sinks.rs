//! Sinks that move released batches out of the collector's critical section.
//!
//! [`ChannelSink`] pushes each batch onto an unbounded channel without
//! blocking; the paired [`BatchStream`] yields them in release order and can
//! feed an async [`Handler`] through [`forward_to_handler`].

use futures::{
    FutureExt, Stream, StreamExt,
    channel::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use sheaf_core::{BoxError, ErrorHandler, Handler, Message, Sink, SinkError};
use std::{
    pin::Pin,
    task::{Context, Poll},
};

/// Create a connected sink/stream pair.
///
/// # Example
///
/// ```rust,ignore
/// let (sink, mut batches) = sheaf_std::sinks::channel::<u32>();
/// let collector = BatchCollector::new(BatchConfig::size(2)?, sink, timer);
///
/// collector.accept(1)?;
/// collector.accept(2)?;
/// assert_eq!(batches.next().await, Some(vec![1, 2]));
/// ```
pub fn channel<T>() -> (ChannelSink<T>, BatchStream<T>) {
    let (tx, rx) = mpsc::unbounded();
    (ChannelSink { tx }, BatchStream { rx })
}

/// Sending half created by [`channel`].
pub struct ChannelSink<T> {
    tx: UnboundedSender<Vec<T>>,
}

impl<T> ChannelSink<T> {
    /// Whether the receiving [`BatchStream`] was dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<T> Clone for ChannelSink<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Send + 'static> Sink<T> for ChannelSink<T> {
    fn release(&self, batch: Vec<T>) -> Result<(), BoxError> {
        self.tx
            .unbounded_send(batch)
            .map_err(|_| Box::new(SinkError::Disconnected) as BoxError)
    }
}

/// Receiving half created by [`channel`]: a stream of released batches.
///
/// The stream ends once every [`ChannelSink`] clone is dropped, i.e. once the
/// owning collector is gone.
pub struct BatchStream<T> {
    rx: UnboundedReceiver<Vec<T>>,
}

impl<T> BatchStream<T> {
    /// Take the next batch if one is already waiting.
    pub fn try_next_batch(&mut self) -> Option<Vec<T>> {
        self.rx.next().now_or_never().flatten()
    }

    /// Stop accepting batches; already queued batches can still be read.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

impl<T> Stream for BatchStream<T> {
    type Item = Vec<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_next_unpin(cx)
    }
}

/// Drive `handler` with every batch from `batches` until the stream ends.
///
/// Returns the number of batches handled. The handler must return `()`; use
/// [`try_forward_to_handler`] for fallible handlers.
pub async fn forward_to_handler<T, H>(mut batches: BatchStream<T>, handler: H) -> usize
where
    T: Message,
    H: Handler<Vec<T>, Output = ()>,
{
    let mut handled = 0;
    while let Some(batch) = batches.next().await {
        #[cfg(feature = "tracing")]
        tracing::trace!(size = batch.len(), "forwarding batch to handler");
        handler.call(batch).await;
        handled += 1;
    }
    handled
}

/// Drive a fallible `handler` with every batch from `batches` until the
/// stream ends.
///
/// Each `Err` is logged and passed to `on_error`; the batch is not retried.
/// Returns the number of batches handled successfully.
pub async fn try_forward_to_handler<T, H, O, E, X>(
    mut batches: BatchStream<T>,
    handler: H,
    on_error: X,
) -> usize
where
    T: Message,
    H: Handler<Vec<T>, Output = Result<O, E>>,
    O: Send + Sync + 'static,
    E: Into<BoxError> + Send + Sync + 'static,
    X: ErrorHandler,
{
    let mut handled = 0;
    while let Some(batch) = batches.next().await {
        #[cfg(feature = "tracing")]
        let size = batch.len();
        match handler.call(batch).await {
            Ok(_) => handled += 1,
            Err(err) => {
                let err: BoxError = err.into();
                #[cfg(feature = "tracing")]
                tracing::warn!(size, error = %err, "batch handler failed");
                on_error.on_error(err);
            }
        }
    }
    handled
}
