//! Batching aggregator hook.
//!
//! Plugs a [`BatchCollector`] into a hook chain: every delivered message is
//! accepted into the collector and consumed.

use crate::collector::BatchCollector;
use sheaf_core::{
    BatchConfig, BatchOptions, BoxError, ErrorHandler, Hook, HookResult, Message, SheafError,
    Sink, Targets, TimerService,
};

/// A [`Hook`] that aggregates messages into batches.
///
/// # Example
///
/// ```rust,ignore
/// use sheaf_std::{BatchingAggregator, sinks, timer::TokioTimer};
/// use sheaf_core::BatchOptions;
///
/// let (sink, batches) = sinks::channel::<String>();
/// let aggregator = BatchingAggregator::from_options(
///     "agg",
///     BatchOptions::new().with_batch_size(2).with_timeout_ms(10).with_output("out"),
///     sink,
///     TokioTimer::current()?,
/// )?;
///
/// aggregator.on_event(&"msg".to_string()).await?;
/// ```
pub struct BatchingAggregator<T, S, R>
where
    T: Send + 'static,
    S: Sink<T>,
    R: TimerService,
{
    name: Option<String>,
    targets: Targets,
    collector: BatchCollector<T, S, R>,
}

impl<T, S, R> BatchingAggregator<T, S, R>
where
    T: Send + 'static,
    S: Sink<T>,
    R: TimerService,
{
    /// Wrap an existing collector.
    pub fn new(collector: BatchCollector<T, S, R>) -> Self {
        Self {
            name: None,
            targets: Targets::default(),
            collector,
        }
    }

    /// Validate `options` and build a named aggregator.
    ///
    /// The configuration is rejected before any message can reach the
    /// aggregator.
    pub fn from_options(
        name: impl Into<String>,
        options: BatchOptions,
        sink: S,
        timer: R,
    ) -> Result<Self, SheafError> {
        let config = BatchConfig::try_from(&options)?;
        Ok(Self::new(BatchCollector::new(config, sink, timer))
            .with_name(name)
            .with_targets(options.targets()))
    }

    /// Like [`from_options`](Self::from_options), but timer-path and
    /// shutdown-flush delivery failures go to `handler`, the in-process
    /// counterpart of the configured `error` target.
    pub fn from_options_with_error_handler<E: ErrorHandler>(
        name: impl Into<String>,
        options: BatchOptions,
        sink: S,
        timer: R,
        handler: E,
    ) -> Result<Self, SheafError> {
        let config = BatchConfig::try_from(&options)?;
        Ok(
            Self::new(BatchCollector::with_error_handler(config, sink, timer, handler))
                .with_name(name)
                .with_targets(options.targets()),
        )
    }

    /// Set the name the host registers this aggregator under.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the wiring identifiers.
    pub fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = targets;
        self
    }

    /// The registration name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The wiring identifiers.
    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// The underlying collector.
    pub fn collector(&self) -> &BatchCollector<T, S, R> {
        &self.collector
    }

    /// Tear down the underlying collector.
    pub fn shutdown(&self) {
        self.collector.shutdown();
    }
}

impl<T, S, R> Hook<T> for BatchingAggregator<T, S, R>
where
    T: Message + Clone,
    S: Sink<T>,
    R: TimerService,
{
    async fn on_event(&self, event: &T) -> Result<HookResult, BoxError> {
        self.collector.accept(event.clone())?;
        Ok(HookResult::Stop)
    }
}
