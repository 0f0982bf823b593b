//! # sheaf - Size- and Time-Triggered Batching for Event Pipelines
//!
//! `sheaf` collects messages arriving one at a time and releases them as a
//! single ordered batch when either a configured batch size is reached or a
//! configured time has passed since the first message of the batch.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sheaf::prelude::*;
//! use sheaf::{sinks, timer::TokioTimer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SheafError> {
//!     let (sink, mut batches) = sinks::channel::<String>();
//!     let aggregator = BatchingAggregator::from_options(
//!         "agg",
//!         BatchOptions::new().with_batch_size(2).with_timeout_ms(10),
//!         sink,
//!         TokioTimer::current()?,
//!     )?;
//!
//!     for msg in ["a", "b", "c"] {
//!         aggregator.on_event(&msg.to_string()).await?;
//!     }
//!     // ["a", "b"] now, ["c"] after 10ms.
//!     Ok(())
//! }
//! ```
//!
//! ## Release Rules
//!
//! - Size is checked on every accepted message and wins ties with the timer.
//! - The timer is armed by the first message of a batch and never re-armed by
//!   later ones: a fixed window, not an inactivity timeout.
//! - Tearing a collector down drops whatever is buffered unless
//!   [`ShutdownPolicy::Flush`] is configured.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

extern crate self as sheaf;

pub use sheaf_core::{
    // Configuration
    BatchConfig,
    BatchConfigBuilder,
    BatchOptions,
    // Error types
    BoxError,
    CollectorError,
    ConfigurationError,
    // Hook
    DynHook,
    // Sink
    ErrorHandler,
    // Handler
    Handler,
    HandlerResult,
    Hook,
    HookResult,
    // Message
    Message,
    SheafError,
    ShutdownPolicy,
    Sink,
    SinkError,
    Targets,
    // Timer
    TimerCallback,
    TimerService,
};

pub use sheaf_std::{BatchCollector, BatchingAggregator, CollectorState};

/// Sinks that hand batches to channels and async handlers.
pub mod sinks {
    pub use sheaf_std::sinks::{
        BatchStream, ChannelSink, channel, forward_to_handler, try_forward_to_handler,
    };
}

/// Timer services.
pub mod timer {
    #[cfg(feature = "tokio")]
    pub use sheaf_std::timer::TokioTimer;
}

/// Standard hook implementations.
pub mod hooks {
    pub use sheaf_std::hooks::LoggingHook;
}

/// Testing utilities.
pub mod testing {
    pub use sheaf_std::testing::{
        CountingHandler, FailingSink, ManualTimer, ManualTimerHandle, RecordingErrorHandler,
        RecordingSink,
    };
}

/// Prelude module - common imports for Sheaf.
///
/// # Usage
///
/// ```rust,ignore
/// use sheaf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BatchCollector, BatchConfig, BatchOptions, BatchingAggregator, BoxError, CollectorError,
        CollectorState, ConfigurationError, Handler, Hook, HookResult, Message, SheafError,
        ShutdownPolicy, Sink, TimerService,
    };
}

#[cfg(feature = "macros")]
pub use sheaf_macros::Message;
