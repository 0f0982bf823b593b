//! Error types for Sheaf.
//!
//! - [`SheafError`] - Top-level error type
//! - [`ConfigurationError`] - Rejected batch configuration
//! - [`CollectorError`] - Errors surfaced by a running collector
//! - [`SinkError`] - Errors raised by the built-in sinks

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Sheaf operations.
#[derive(Error, Debug)]
pub enum SheafError {
    /// The configuration was rejected.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A collector operation failed.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised while validating a batch configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Neither a batch size nor a timeout was configured.
    #[error("invalid configuration: batch size or timeout must be defined")]
    NoReleaseCondition,

    /// The batch size does not fit the platform's `usize`.
    #[error("invalid configuration: batch size {0} is too large")]
    BatchSizeOverflow(u64),
}

/// Errors surfaced by a running collector.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// The collector was shut down; the payload was dropped.
    #[error("collector has been shut down")]
    Closed,

    /// The sink rejected a released batch. The batch is not retried.
    #[error("batch delivery failed")]
    Delivery(#[source] BoxError),

    /// No async runtime was available to drive timers.
    #[error("no timer runtime available: {0}")]
    NoRuntime(String),
}

/// Errors raised by the built-in sinks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The receiving end of a channel sink was dropped.
    #[error("downstream receiver has been dropped")]
    Disconnected,
}

impl From<BoxError> for SheafError {
    fn from(err: BoxError) -> Self {
        SheafError::Custom(err)
    }
}
