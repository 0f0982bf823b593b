//! Logging Hook - Observability for message delivery.

use sheaf_core::{BoxError, Hook, HookResult, Message};
use std::fmt::Debug;

/// A Hook that logs every message and lets it continue.
///
/// Place it in front of an aggregator to see what is being batched.
/// It uses `tracing` when the `tracing` feature is enabled and does nothing
/// otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use sheaf_std::hooks::LoggingHook;
///
/// let logging = LoggingHook::named("orders_in");
/// logging.on_event(&order).await?;
/// aggregator.on_event(&order).await?;
/// ```
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a new `LoggingHook` with a default name.
    pub fn new() -> Self {
        Self { name: "message" }
    }

    /// Create a new `LoggingHook` with a custom name.
    ///
    /// The name is used in log records to identify the input.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log records.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Hook<E> for LoggingHook
where
    E: Message + Debug,
{
    async fn on_event(&self, event: &E) -> Result<HookResult, BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.name, event = ?event, "message received");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, event);
        }

        Ok(HookResult::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Order {
        _id: u64,
    }

    impl Message for Order {}

    #[tokio::test]
    async fn test_logging_hook_continues() {
        let hook = LoggingHook::new();
        let result = hook.on_event(&Order { _id: 1 }).await.unwrap();
        assert_eq!(result, HookResult::Next);
        assert_eq!(hook.name(), "message");
    }

    #[tokio::test]
    async fn test_logging_hook_named() {
        let hook = LoggingHook::named("orders_in");
        let result = hook.on_event(&Order { _id: 2 }).await.unwrap();
        assert_eq!(result, HookResult::Next);
        assert_eq!(hook.name(), "orders_in");
    }
}
