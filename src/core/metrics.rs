//! Writer metrics for observability
//!
//! Counters describing what a writer has done with the records handed to it:
//! how many reached the buffer, how many had to be replaced by a degraded
//! record, and how many were lost to sink errors.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-writer counters
///
/// # Example
///
/// ```
/// use scopelog::WriterMetrics;
///
/// let metrics = WriterMetrics::new();
/// metrics.record_written(42);
/// metrics.record_write_error();
///
/// assert_eq!(metrics.records_written(), 1);
/// assert_eq!(metrics.bytes_written(), 42);
/// assert_eq!(metrics.write_errors(), 1);
/// ```
#[derive(Debug)]
pub struct WriterMetrics {
    /// Records appended to the buffer, degraded records included
    records_written: AtomicU64,

    /// Bytes appended to the buffer, newlines included
    bytes_written: AtomicU64,

    /// Records whose fields could not be serialized
    marshal_failures: AtomicU64,

    /// Records lost because the sink returned an error
    write_errors: AtomicU64,

    /// Completed flush calls
    flushes: AtomicU64,
}

impl WriterMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            marshal_failures: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn marshal_failures(&self) -> u64 {
        self.marshal_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    /// Record a buffered record of `bytes` length
    #[inline]
    pub fn record_written(&self, bytes: usize) -> u64 {
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
        self.records_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_marshal_failure(&self) -> u64 {
        self.marshal_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flushes.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for WriterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for WriterMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_written: AtomicU64::new(self.records_written()),
            bytes_written: AtomicU64::new(self.bytes_written()),
            marshal_failures: AtomicU64::new(self.marshal_failures()),
            write_errors: AtomicU64::new(self.write_errors()),
            flushes: AtomicU64::new(self.flushes()),
        }
    }
}
