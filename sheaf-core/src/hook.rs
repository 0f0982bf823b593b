//! # Upstream delivery hook
//!
//! A [`Hook`] is invoked once per delivered message. The surrounding bus
//! decides the order and guarantees that a given hook never receives two
//! messages at the same time; the hook decides whether the message continues
//! to the next hook (`Next`) or was consumed (`Stop`).
//!
//! Aggregators are hooks that always consume: the message is absorbed into a
//! batch and reappears downstream only as part of a released batch.

use crate::{error::BoxError, message::Message};
use std::{future::Future, pin::Pin};

/// Result of hook execution indicating whether to continue or stop propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// The message was observed; continue to the next hook.
    Next,
    /// The message was consumed; stop propagation to subsequent hooks.
    Stop,
}

/// Entry point for message delivery.
///
/// This trait uses native `async fn` for static dispatch. For dynamic
/// dispatch (e.g. a bus holding heterogeneous hooks), use [`DynHook`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Hook<{E}>`",
    label = "missing `Hook` implementation",
    note = "Hooks must implement `on_event` for the specific message type `{E}`."
)]
pub trait Hook<E: Message>: Send + Sync + 'static {
    /// Called when a message is delivered.
    fn on_event(&self, event: &E) -> impl Future<Output = Result<HookResult, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Hook`].
pub trait DynHook<E: Message>: Send + Sync + 'static {
    /// Called when a message is delivered (dynamic dispatch version).
    fn on_event_dyn<'a>(
        &'a self,
        event: &'a E,
    ) -> Pin<Box<dyn Future<Output = Result<HookResult, BoxError>> + Send + 'a>>;
}

// Any type implementing Hook implements DynHook automatically.
impl<E: Message, T: Hook<E>> DynHook<E> for T {
    fn on_event_dyn<'a>(
        &'a self,
        event: &'a E,
    ) -> Pin<Box<dyn Future<Output = Result<HookResult, BoxError>> + Send + 'a>> {
        Box::pin(self.on_event(event))
    }
}

impl<E: Message> Hook<E> for Box<dyn DynHook<E>> {
    async fn on_event(&self, event: &E) -> Result<HookResult, BoxError> {
        // The box is itself a `DynHook` through the blanket impl; call the inner object.
        (**self).on_event_dyn(event).await
    }
}
