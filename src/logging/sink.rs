//! Sinks: destinations that receive filtered, formatted records
//!
//! Every sink owns its severity threshold and an immutable format. Writes to
//! a sink are serialized by its own mutex, so concurrent emitters never
//! interleave partial lines.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::format::RecordFormat;
use super::level::{Severity, SeverityCell};
use super::record::LogRecord;
use super::rotation::RotatingWriter;
use crate::error::{Result, SetupError};

/// A destination for log records
pub trait Sink: Send + Sync {
    /// Minimum severity this sink emits
    fn threshold(&self) -> Severity;

    /// Change the minimum severity; applies to subsequent records only
    fn set_threshold(&self, level: Severity);

    /// Write one record unconditionally
    fn write_record(&self, record: &LogRecord) -> io::Result<()>;

    /// Flush buffered output
    fn flush(&self) -> io::Result<()>;

    /// Whether a record of `severity` passes this sink's threshold
    fn accepts(&self, severity: Severity) -> bool {
        severity >= self.threshold()
    }

    /// Write `record` if it passes the threshold
    ///
    /// Returns whether the record was written.
    fn handle(&self, record: &LogRecord) -> io::Result<bool> {
        if !self.accepts(record.severity) {
            return Ok(false);
        }
        self.write_record(record)?;
        Ok(true)
    }
}

/// Writes bare message text to stdout (or a substitute writer)
pub struct ConsoleSink {
    writer: Mutex<Box<dyn Write + Send>>,
    threshold: SeverityCell,
    format: RecordFormat,
}

impl ConsoleSink {
    /// Console sink writing to the process's standard output
    pub fn stdout(threshold: Severity) -> Self {
        Self::with_writer(Box::new(io::stdout()), threshold)
    }

    /// Console sink writing to `writer` instead of stdout
    pub fn with_writer(writer: Box<dyn Write + Send>, threshold: Severity) -> Self {
        Self {
            writer: Mutex::new(writer),
            threshold: SeverityCell::new(threshold),
            format: RecordFormat::MessageOnly,
        }
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }
}

impl Sink for ConsoleSink {
    fn threshold(&self) -> Severity {
        self.threshold.get()
    }

    fn set_threshold(&self, level: Severity) {
        self.threshold.set(level);
    }

    fn write_record(&self, record: &LogRecord) -> io::Result<()> {
        let line = self.format.render_line(record);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

/// Writes detailed records to a size-rotated file set
pub struct RotatingFileSink {
    path: PathBuf,
    writer: Mutex<RotatingWriter>,
    threshold: SeverityCell,
    format: RecordFormat,
}

impl RotatingFileSink {
    /// Open a rotating sink bound to `path`
    ///
    /// Creates the parent directory and any missing ancestors first. An
    /// empty parent (a bare file name) means the current directory.
    pub fn open(path: impl AsRef<Path>, threshold: Severity) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(SetupError::filesystem(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "log file path is empty"),
            ));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| SetupError::filesystem(parent, e))?;
            }
        }

        // file-rotate defers open errors to the first write; surface them now
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SetupError::filesystem(path, e))?;

        tracing::debug!(path = %path.display(), threshold = %threshold, "Opened rotating log file");

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(RotatingWriter::open(path)),
            threshold: SeverityCell::new(threshold),
            format: RecordFormat::Detailed,
        })
    }

    /// Path of the primary log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }
}

impl Sink for RotatingFileSink {
    fn threshold(&self) -> Severity {
        self.threshold.get()
    }

    fn set_threshold(&self, level: Severity) {
        self.threshold.set(level);
    }

    fn write_record(&self, record: &LogRecord) -> io::Result<()> {
        let line = self.format.render_line(record);
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_line(line.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

impl std::fmt::Debug for RotatingFileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileSink")
            .field("path", &self.path)
            .field("threshold", &self.threshold.get())
            .finish()
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("threshold", &self.threshold.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::record::Callsite;
    use crate::logging::test_support::SharedBuffer;
    use tempfile::TempDir;

    fn record(severity: Severity, message: &str) -> LogRecord {
        LogRecord::new("test", severity, Callsite::new("src/app.rs", 7, "run"), message)
    }

    #[test]
    fn test_console_sink_filters_below_threshold() {
        let buffer = SharedBuffer::default();
        let sink = ConsoleSink::with_writer(Box::new(buffer.clone()), Severity::Warning);

        assert!(!sink.handle(&record(Severity::Info, "quiet")).unwrap());
        assert!(sink.handle(&record(Severity::Error, "loud")).unwrap());

        assert_eq!(buffer.contents(), "loud\n");
    }

    #[test]
    fn test_console_sink_threshold_change() {
        let buffer = SharedBuffer::default();
        let sink = ConsoleSink::with_writer(Box::new(buffer.clone()), Severity::Info);

        sink.handle(&record(Severity::Debug, "first")).unwrap();
        sink.set_threshold(Severity::Debug);
        sink.handle(&record(Severity::Debug, "second")).unwrap();

        assert_eq!(buffer.contents(), "second\n");
        assert_eq!(sink.threshold(), Severity::Debug);
        assert_eq!(sink.format(), RecordFormat::MessageOnly);
    }

    #[test]
    fn test_file_sink_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/deeper/app.log");

        let sink = RotatingFileSink::open(&path, Severity::Info).unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(path.is_file());
        assert_eq!(sink.path(), path.as_path());
        assert_eq!(sink.format(), RecordFormat::Detailed);
    }

    #[test]
    fn test_file_sink_existing_directory_is_fine() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");

        RotatingFileSink::open(&path, Severity::Info).unwrap();
        RotatingFileSink::open(&path, Severity::Info).unwrap();
    }

    #[test]
    fn test_file_sink_writes_detailed_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let sink = RotatingFileSink::open(&path, Severity::Info).unwrap();

        sink.handle(&record(Severity::Debug, "hidden")).unwrap();
        sink.handle(&record(Severity::Info, "shown")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("hidden"));
        let line = content.lines().next().unwrap();
        assert!(line.contains("|INFO|"));
        assert!(line.ends_with("|app@7:run shown"));
    }

    #[test]
    fn test_file_sink_rejects_directory_path() {
        let temp_dir = TempDir::new().unwrap();
        let err = RotatingFileSink::open(temp_dir.path(), Severity::Info).unwrap_err();
        assert!(err.is_filesystem());
    }

    #[test]
    fn test_file_sink_rejects_empty_path() {
        let err = RotatingFileSink::open("", Severity::Info).unwrap_err();
        assert!(err.is_filesystem());
    }

    #[test]
    fn test_file_sink_uncreatable_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = RotatingFileSink::open(blocker.join("logs/app.log"), Severity::Info).unwrap_err();
        assert!(err.is_filesystem());
    }
}
