//! Writer trait for log output destinations, and the sinks writers buffer into

use super::error::{LoggerError, Result};
use super::field_value::Fields;
use super::metrics::WriterMetrics;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

/// Default capacity of the buffer in front of a sink (4 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 4 * 1024;

/// Record keys written by the JSON writer
pub const FIELD_TIME: &str = "time";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_MESSAGE: &str = "msg";
pub const FIELD_CALLER: &str = "caller";
/// Key read by `Scope::error` and written by `with_error`
pub const FIELD_ERROR: &str = "error";

/// Formats and persists one record per call
///
/// Implementations are shared between threads and must serialize `write`
/// and `flush` internally so records never interleave.
pub trait Writer: Send + Sync {
    /// Write one record. Level filtering is the caller's job.
    fn write(&self, level: i32, message: &str, fields: &Fields) -> Result<()>;

    /// Push buffered records to the sink and close it if it supports closing
    fn flush(&self) -> Result<()>;

    fn name(&self) -> &str;

    /// Frame-skip depth handed to the writer's caller provider
    fn set_skip_frames(&self, _skip: usize) {}
}

/// Byte destination behind a writer's buffer
///
/// `close` runs after every flush and must tolerate repeated calls.
pub trait Sink: Write + Send {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for io::Stdout {}
impl Sink for io::Stderr {}
impl Sink for io::Sink {}
impl Sink for Vec<u8> {}

impl Sink for File {
    fn close(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Cloneable in-memory sink; every clone sees the same bytes
///
/// # Example
///
/// ```
/// use scopelog::prelude::*;
/// use std::sync::Arc;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .writer(Arc::new(TextWriter::new(buffer.clone())))
///     .build();
///
/// logger.info("ready");
/// logger.flush().unwrap();
/// assert!(buffer.contents().contains("[INFO]"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for SharedBuffer {}

/// Mutex-guarded `BufWriter` shared by the built-in writers
pub(crate) struct RecordBuffer<W: Sink> {
    buffer: Mutex<BufWriter<W>>,
    metrics: WriterMetrics,
}

impl<W: Sink> RecordBuffer<W> {
    pub(crate) fn new(sink: W, capacity: usize) -> Self {
        Self {
            buffer: Mutex::new(BufWriter::with_capacity(capacity, sink)),
            metrics: WriterMetrics::new(),
        }
    }

    /// Rebuild with another capacity, carrying over anything still buffered
    pub(crate) fn resize(self, capacity: usize) -> Self {
        let (sink, pending) = self.buffer.into_inner().into_parts();
        let mut buffer = BufWriter::with_capacity(capacity, sink);
        if let Ok(pending) = pending {
            if let Err(e) = buffer.write_all(&pending) {
                eprintln!(
                    "[LOGGER ERROR] Lost {} buffered bytes while resizing: {}",
                    pending.len(),
                    e
                );
            }
        }

        Self {
            buffer: Mutex::new(buffer),
            metrics: self.metrics,
        }
    }

    /// Append one complete record; the trailing newline is added here
    pub(crate) fn append(&self, record: &[u8]) -> Result<()> {
        let mut buffer = self.buffer.lock();
        let result = buffer
            .write_all(record)
            .and_then(|()| buffer.write_all(b"\n"));

        match result {
            Ok(()) => {
                self.metrics.record_written(record.len() + 1);
                Ok(())
            }
            Err(e) => {
                self.metrics.record_write_error();
                Err(LoggerError::io_operation(
                    "writing log record",
                    "sink rejected buffered bytes",
                    e,
                ))
            }
        }
    }

    pub(crate) fn flush(&self) -> Result<()> {
        let mut buffer = self.buffer.lock();
        buffer
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing log buffer", "sink flush failed", e))?;
        buffer
            .get_mut()
            .close()
            .map_err(|e| LoggerError::io_operation("closing log sink", "sink close failed", e))?;
        self.metrics.record_flush();
        Ok(())
    }

    pub(crate) fn metrics(&self) -> &WriterMetrics {
        &self.metrics
    }

    #[cfg(test)]
    pub(crate) fn buffered_len(&self) -> usize {
        self.buffer.lock().buffer().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    impl Sink for FailingSink {}

    #[test]
    fn test_shared_buffer_clones_share_bytes() {
        let buffer = SharedBuffer::new();
        let mut handle = buffer.clone();
        handle.write_all(b"one\ntwo\n").unwrap();

        assert_eq!(buffer.lines(), vec!["one", "two"]);
        assert_eq!(buffer.len(), 8);

        buffer.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn test_record_buffer_holds_until_flush() {
        let sink = SharedBuffer::new();
        let records = RecordBuffer::new(sink.clone(), DEFAULT_BUFFER_SIZE);

        records.append(b"first").unwrap();
        assert!(sink.is_empty());
        assert_eq!(records.buffered_len(), 6);

        records.flush().unwrap();
        assert_eq!(sink.contents(), "first\n");
        assert_eq!(records.metrics().records_written(), 1);
        assert_eq!(records.metrics().bytes_written(), 6);
    }

    #[test]
    fn test_resize_keeps_pending_bytes() {
        let sink = SharedBuffer::new();
        let records = RecordBuffer::new(sink.clone(), 64);
        records.append(b"kept").unwrap();

        let records = records.resize(DEFAULT_BUFFER_SIZE);
        assert_eq!(records.buffered_len(), 5);
        assert_eq!(records.metrics().records_written(), 1);

        records.flush().unwrap();
        assert_eq!(sink.contents(), "kept\n");
    }

    #[test]
    fn test_flush_is_repeatable() {
        let records = RecordBuffer::new(Vec::new(), DEFAULT_BUFFER_SIZE);
        records.append(b"x").unwrap();

        records.flush().unwrap();
        records.flush().unwrap();
        assert_eq!(records.metrics().flushes(), 2);
    }

    #[test]
    fn test_sink_errors_surface_on_flush() {
        let records = RecordBuffer::new(FailingSink, DEFAULT_BUFFER_SIZE);
        records.append(b"lost").unwrap();

        let err = records.flush().unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }

    #[test]
    fn test_oversized_record_reports_write_error() {
        let records = RecordBuffer::new(FailingSink, 4);
        let err = records.append(b"larger than the buffer").unwrap_err();

        assert!(err.to_string().contains("writing log record"));
        assert_eq!(records.metrics().write_errors(), 1);
    }
}
