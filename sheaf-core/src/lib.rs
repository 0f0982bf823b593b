//! # sheaf-core
//!
//! Core traits for the Sheaf batching aggregator.
//!
//! This crate has minimal dependencies and is meant to be imported by hosts
//! and extensions that only need the seams, not the `sheaf-std`
//! implementations.
//!
//! # Seams
//!
//! - [`Hook`]: how messages arrive. The host bus invokes it once per message.
//! - [`Sink`]: how batches leave. Called synchronously on release.
//! - [`TimerService`]: how time passes. Schedules and cancels deferred
//!   releases.
//! - [`Handler`]: async business logic placed behind a sink.
//!
//! # Configuration
//!
//! [`BatchOptions`] is the host-facing surface; [`BatchConfig`] is the
//! validated form a collector is built from.
//!
//! # Error Types
//!
//! - [`SheafError`] - Top-level error type
//! - [`ConfigurationError`] - Invalid release conditions
//! - [`CollectorError`] - Runtime collector errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod error;
mod handler;
mod hook;
mod message;
mod sink;
mod timer;

// Re-exports
pub use config::{BatchConfig, BatchConfigBuilder, BatchOptions, ShutdownPolicy, Targets};
pub use error::{BoxError, CollectorError, ConfigurationError, SheafError, SinkError};
pub use handler::{Handler, HandlerResult};
pub use hook::{DynHook, Hook, HookResult};
pub use message::Message;
pub use sink::{ErrorHandler, Sink};
pub use timer::{TimerCallback, TimerService};
