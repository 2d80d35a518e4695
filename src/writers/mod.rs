//! Built-in writers: plain text lines and JSON lines

mod json;
mod text;

pub use json::JsonWriter;
pub use text::TextWriter;

use crate::core::{Caller, CallerInfo, LoggerError, Result, TrackedCaller, DEFAULT_SKIP_FRAMES};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Open `path` for appending, creating it if needed
pub(crate) fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::file_writer(path.display().to_string(), e.to_string()))
}

/// Caller provider plus the skip depth handed to it
pub(crate) struct CallerLookup {
    provider: Arc<dyn CallerInfo>,
    skip_frames: AtomicUsize,
}

impl CallerLookup {
    pub(crate) fn set_provider(&mut self, provider: Arc<dyn CallerInfo>) {
        self.provider = provider;
    }

    pub(crate) fn set_skip(&self, skip: usize) {
        self.skip_frames.store(skip, Ordering::Relaxed);
    }

    pub(crate) fn skip(&self) -> usize {
        self.skip_frames.load(Ordering::Relaxed)
    }

    pub(crate) fn resolve(&self) -> Caller {
        self.provider.caller(self.skip())
    }
}

impl Default for CallerLookup {
    fn default() -> Self {
        Self {
            provider: Arc::new(TrackedCaller),
            skip_frames: AtomicUsize::new(DEFAULT_SKIP_FRAMES),
        }
    }
}
