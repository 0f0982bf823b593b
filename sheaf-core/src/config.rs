//! Batch configuration.
//!
//! Two layers:
//!
//! - [`BatchOptions`]: the plain-data surface a host fills in (or, with the
//!   `serde` feature, deserializes). Zero means "not a factor", matching how
//!   bus configuration is usually written.
//! - [`BatchConfig`]: the validated form. Each trigger is an explicit
//!   `Option`, and at least one of them is always set.

use crate::error::ConfigurationError;
use std::{num::NonZeroUsize, time::Duration};

/// What happens to a partially filled batch when its collector is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShutdownPolicy {
    /// Drop buffered payloads silently.
    #[default]
    Discard,
    /// Release buffered payloads as a final batch.
    Flush,
}

/// Validated release conditions of a collector.
///
/// # Example
///
/// ```rust,ignore
/// use sheaf_core::BatchConfig;
///
/// // Release every 100 messages or 250ms after the first one, whichever is first.
/// let config = BatchConfig::builder().batch_size(100).timeout_ms(250).build()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    batch_size: Option<NonZeroUsize>,
    timeout: Option<Duration>,
    shutdown: ShutdownPolicy,
}

impl BatchConfig {
    /// Build a configuration from the raw knobs, where `0` disables a trigger.
    ///
    /// Fails with [`ConfigurationError::NoReleaseCondition`] if both are `0`.
    pub fn new(batch_size: usize, timeout_ms: u64) -> Result<Self, ConfigurationError> {
        Self::builder()
            .batch_size(batch_size)
            .timeout_ms(timeout_ms)
            .build()
    }

    /// Release on size only.
    pub fn size(batch_size: usize) -> Result<Self, ConfigurationError> {
        Self::new(batch_size, 0)
    }

    /// Release on timeout only.
    pub fn millis(timeout_ms: u64) -> Result<Self, ConfigurationError> {
        Self::new(0, timeout_ms)
    }

    /// Start a builder with every trigger disabled.
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::default()
    }

    /// Replace the shutdown policy.
    pub fn with_shutdown(mut self, policy: ShutdownPolicy) -> Self {
        self.shutdown = policy;
        self
    }

    /// Number of messages that triggers a release, if size is a factor.
    pub fn batch_size(&self) -> Option<NonZeroUsize> {
        self.batch_size
    }

    /// Time since the first message of a window that triggers a release, if
    /// time is a factor.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The shutdown policy.
    pub fn shutdown(&self) -> ShutdownPolicy {
        self.shutdown
    }
}

/// Builder for [`BatchConfig`].
#[derive(Debug, Clone, Default)]
pub struct BatchConfigBuilder {
    batch_size: usize,
    timeout: Duration,
    shutdown: ShutdownPolicy,
}

impl BatchConfigBuilder {
    /// Release once this many messages are buffered. `0` disables.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Release this long after the first message of a window. Zero disables.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Same as [`timeout`](Self::timeout), in milliseconds.
    pub fn timeout_ms(self, timeout_ms: u64) -> Self {
        self.timeout(Duration::from_millis(timeout_ms))
    }

    /// What to do with buffered payloads on teardown.
    pub fn shutdown(mut self, policy: ShutdownPolicy) -> Self {
        self.shutdown = policy;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<BatchConfig, ConfigurationError> {
        let batch_size = NonZeroUsize::new(self.batch_size);
        let timeout = (!self.timeout.is_zero()).then_some(self.timeout);

        if batch_size.is_none() && timeout.is_none() {
            return Err(ConfigurationError::NoReleaseCondition);
        }

        Ok(BatchConfig {
            batch_size,
            timeout,
            shutdown: self.shutdown,
        })
    }
}

/// Opaque bus identifiers an aggregator is wired with.
///
/// The collector never interprets them; they are carried for the host bus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    /// Where released batches go.
    pub output: Option<String>,
    /// Where messages come from.
    pub input: Option<String>,
    /// Where delivery failures go.
    pub error: Option<String>,
}

/// Recognized aggregator options, as a host would write them.
///
/// With the `serde` feature the camelCase spellings (`batchSize`,
/// `timeoutMs`) and the short forms (`batch`, `timeout`) are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatchOptions {
    /// Messages per batch, `0` meaning unbounded.
    #[cfg_attr(feature = "serde", serde(alias = "batchSize", alias = "batch"))]
    pub batch_size: u64,
    /// Milliseconds since the first message of a batch, `0` meaning no timeout.
    #[cfg_attr(feature = "serde", serde(alias = "timeoutMs", alias = "timeout"))]
    pub timeout_ms: u64,
    /// Output target identifier.
    pub output: Option<String>,
    /// Input target identifier.
    pub input: Option<String>,
    /// Error target identifier.
    pub error: Option<String>,
    /// Shutdown policy.
    pub shutdown: ShutdownPolicy,
}

impl BatchOptions {
    /// Options with every trigger disabled and no targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the timeout in milliseconds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the output target.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the input target.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Set the error target.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set the shutdown policy.
    pub fn with_shutdown(mut self, policy: ShutdownPolicy) -> Self {
        self.shutdown = policy;
        self
    }

    /// The wiring identifiers.
    pub fn targets(&self) -> Targets {
        Targets {
            output: self.output.clone(),
            input: self.input.clone(),
            error: self.error.clone(),
        }
    }
}

impl TryFrom<&BatchOptions> for BatchConfig {
    type Error = ConfigurationError;

    fn try_from(options: &BatchOptions) -> Result<Self, Self::Error> {
        let batch_size = usize::try_from(options.batch_size)
            .map_err(|_| ConfigurationError::BatchSizeOverflow(options.batch_size))?;

        BatchConfig::builder()
            .batch_size(batch_size)
            .timeout_ms(options.timeout_ms)
            .shutdown(options.shutdown)
            .build()
    }
}

impl TryFrom<BatchOptions> for BatchConfig {
    type Error = ConfigurationError;

    fn try_from(options: BatchOptions) -> Result<Self, Self::Error> {
        BatchConfig::try_from(&options)
    }
}
