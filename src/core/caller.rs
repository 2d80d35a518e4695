//! Caller location capture
//!
//! Emission methods on scopes and loggers are `#[track_caller]`; they record
//! the call site on the current thread for the duration of the writer call,
//! and [`TrackedCaller`] reads it back. Writers only see the [`CallerInfo`]
//! trait, so other providers can be plugged in.
//!
//! A skip depth of [`DEFAULT_SKIP_FRAMES`] attributes a record to the line
//! that called the logging method. Each extra frame moves the attribution
//! one function further out.

use std::cell::Cell;
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Frame-skip depth that attributes a record to the logging call itself
pub const DEFAULT_SKIP_FRAMES: usize = 1;

thread_local! {
    static CALL_SITE: Cell<Option<&'static Location<'static>>> = const { Cell::new(None) };
}

/// File name and line of the code that emitted a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: String,
    pub line: u32,
}

impl Caller {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Used when no call site is known
    pub fn unknown() -> Self {
        Self::new("unknown", 0)
    }

    /// Build from a source location, keeping only the file name
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(base_name(Path::new(location.file())), location.line())
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Resolves the location a record is attributed to
///
/// `skip` is the configured frame-skip depth of the writer asking.
pub trait CallerInfo: Send + Sync {
    fn caller(&self, skip: usize) -> Caller;
}

impl<F> CallerInfo for F
where
    F: Fn(usize) -> Caller + Send + Sync,
{
    fn caller(&self, skip: usize) -> Caller {
        self(skip)
    }
}

/// Default provider backed by `#[track_caller]`
///
/// At [`DEFAULT_SKIP_FRAMES`] or below the tracked call site is used as is.
/// Deeper skips walk the stack outward from the frame holding the call site,
/// falling back to the call site when that frame cannot be resolved (missing
/// debug info, inlining). Marking a logging helper `#[track_caller]` skips it
/// without any stack walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackedCaller;

impl CallerInfo for TrackedCaller {
    fn caller(&self, skip: usize) -> Caller {
        let Some(site) = CALL_SITE.with(Cell::get) else {
            return Caller::unknown();
        };
        let tracked = Caller::from_location(site);
        if skip <= DEFAULT_SKIP_FRAMES {
            return tracked;
        }
        outer_frame(&tracked, skip - DEFAULT_SKIP_FRAMES).unwrap_or(tracked)
    }
}

/// Walk the stack to `anchor`, then `outward` frames further
fn outer_frame(anchor: &Caller, outward: usize) -> Option<Caller> {
    let mut frames = Vec::new();
    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if let (Some(path), Some(line)) = (symbol.filename(), symbol.lineno()) {
                frames.push(Caller::new(base_name(path), line));
            }
        });
        true
    });

    let start = frames.iter().position(|frame| frame == anchor)?;
    frames.get(start + outward).cloned()
}

/// Restores the previous call site when dropped, also on unwind
struct CallSiteGuard {
    previous: Option<&'static Location<'static>>,
}

impl Drop for CallSiteGuard {
    fn drop(&mut self) {
        CALL_SITE.with(|site| site.set(self.previous));
    }
}

/// Run `f` with `location` recorded as the current call site
pub(crate) fn with_call_site<R>(location: &'static Location<'static>, f: impl FnOnce() -> R) -> R {
    let previous = CALL_SITE.with(|site| site.replace(Some(location)));
    let _guard = CallSiteGuard { previous };
    f()
}
