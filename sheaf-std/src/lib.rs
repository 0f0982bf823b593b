//! # sheaf-std
//!
//! Standard implementations for the Sheaf batching aggregator.
//!
//! This crate provides:
//! - **Collector**: [`BatchCollector`], the size/timeout release state machine
//! - **Aggregator hook**: [`BatchingAggregator`]
//! - **Timers**: [`timer::TokioTimer`] (feature `tokio`), [`testing::ManualTimer`]
//! - **Sinks**: [`sinks::ChannelSink`], [`sinks::BatchStream`], [`sinks::forward_to_handler`],
//!   [`sinks::try_forward_to_handler`]
//! - **Standard hooks**: Logging

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use sheaf_core;

// Modules
pub mod aggregator;
pub mod collector;
pub mod hooks;
pub mod sinks;
pub mod testing;
#[cfg(feature = "tokio")]
pub mod timer;

pub use aggregator::BatchingAggregator;
pub use collector::{BatchCollector, CollectorState};
