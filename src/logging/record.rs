//! Log records and the source location they were emitted from

use std::panic::Location;
use std::path::Path;

use chrono::{DateTime, Local};

use super::level::Severity;

/// Function name used when the emitting function cannot be determined
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Where a record was emitted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Callsite {
    file: &'static str,
    line: u32,
    function: &'static str,
}

impl Callsite {
    /// Create a callsite from its parts
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Capture the location of the calling code
    ///
    /// The function name is not available through `Location`, so it is
    /// reported as [`UNKNOWN_FUNCTION`]. Use the `callsite!` macro to get it.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), UNKNOWN_FUNCTION)
    }

    /// Source file path as compiled
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Module name: the stem of the source file (`src/worker.rs` -> `worker`)
    pub fn module(&self) -> &'static str {
        Path::new(self.file)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.file)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> &'static str {
        self.function
    }
}

/// A single record on its way to the sinks of a channel
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Local time the record was created
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    /// Name of the channel that emitted the record
    pub channel: String,
    pub process_id: u32,
    pub callsite: Callsite,
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current time and process id
    pub fn new(
        channel: impl Into<String>,
        severity: Severity,
        callsite: Callsite,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            channel: channel.into(),
            process_id: std::process::id(),
            callsite,
            message: message.into(),
        }
    }
}

/// Bare name of the function enclosing the macro call
#[doc(hidden)]
pub fn trim_function_path(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__splitlog_marker").unwrap_or(path);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit("::").next().unwrap_or(path)
}
