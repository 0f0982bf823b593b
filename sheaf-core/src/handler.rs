//! # Downstream handler
//!
//! An async consumer of released batches. Handlers sit behind a channel so
//! that slow business logic never runs inside the collector's critical
//! section; see `sheaf_std::sinks::forward_to_handler`.

use crate::message::Message;
use std::future::Future;

/// A marker trait for the result of a handler execution.
pub trait HandlerResult: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> HandlerResult for T {}

/// The terminal endpoint of a pipeline.
///
/// Handlers receive a fully owned message and perform async business logic.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle input of type `{In}`",
    label = "missing `Handler<{In}>` implementation",
    note = "Handlers must implement the `call` method for the input type `{In}`."
)]
pub trait Handler<In: Message>: Send + Sync + 'static {
    /// The output type of the handler, usually `()` or a `Result`.
    type Output: HandlerResult;

    /// Executes the handler logic.
    fn call(&self, input: In) -> impl Future<Output = Self::Output> + Send;
}

// Blanket impl for closures
impl<F, In, Out, Fut> Handler<In> for F
where
    In: Message,
    Out: HandlerResult,
    F: Fn(In) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Out> + Send,
{
    type Output = Out;

    fn call(&self, input: In) -> impl Future<Output = Self::Output> + Send {
        (self)(input)
    }
}
