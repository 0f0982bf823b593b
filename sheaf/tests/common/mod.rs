#![allow(dead_code)]

use sheaf::{
    BatchCollector, BatchConfig, Message,
    testing::{ManualTimer, RecordingSink},
    timer::TokioTimer,
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Test Payload Types
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    pub sensor: u32,
    pub value: i64,
}

impl Message for Reading {}

pub fn reading(sensor: u32, value: i64) -> Reading {
    Reading { sensor, value }
}

// ============================================================================
// Setup Helpers
// ============================================================================

/// Install a test-writer subscriber; `RUST_LOG=sheaf_std=debug` shows releases.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub type TokioCollector<T> = BatchCollector<T, RecordingSink<T>, TokioTimer>;

/// A collector on the current tokio runtime recording into a fresh sink.
pub fn tokio_collector<T: Send + 'static>(
    batch_size: usize,
    timeout_ms: u64,
) -> (TokioCollector<T>, RecordingSink<T>) {
    init_tracing();
    let sink = RecordingSink::new();
    let collector = BatchCollector::new(
        BatchConfig::new(batch_size, timeout_ms).unwrap(),
        sink.clone(),
        TokioTimer::current().unwrap(),
    );
    (collector, sink)
}

pub type ManualCollector<T> = BatchCollector<T, RecordingSink<T>, ManualTimer>;

/// A collector on a virtual clock recording into a fresh sink.
pub fn manual_collector<T: Send + 'static>(
    batch_size: usize,
    timeout_ms: u64,
) -> (ManualCollector<T>, RecordingSink<T>, ManualTimer) {
    let sink = RecordingSink::new();
    let timer = ManualTimer::new();
    let collector = BatchCollector::new(
        BatchConfig::new(batch_size, timeout_ms).unwrap(),
        sink.clone(),
        timer.clone(),
    );
    (collector, sink, timer)
}
