//! Template store metrics collection.
//!
//! Provides functions for recording store-related metrics. Nothing is exported
//! unless the embedding application installs a `metrics` recorder.

use metrics::{counter, histogram};
use std::time::Instant;

/// Record template store operation duration.
pub fn record_operation_duration(operation: &str, duration_secs: f64) {
    histogram!(
        "template_store_operation_duration_seconds",
        "operation" => operation.to_string()
    )
    .record(duration_secs);
}

/// Record a namespace write rejected by the underlying store.
pub fn record_write_failure(namespace: &str) {
    counter!(
        "template_store_write_failures_total",
        "namespace" => namespace.to_string()
    )
    .increment(1);
}

/// A helper to time store operations and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = StoreTimer::new("load_namespace");
/// let raw = self.store.get(&key);
/// timer.record();
/// ```
pub struct StoreTimer {
    operation: String,
    start: Instant,
}

impl StoreTimer {
    /// Create a new timer for the given operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_operation_duration(&self.operation, duration);
    }
}
