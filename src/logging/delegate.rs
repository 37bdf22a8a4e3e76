//! Console + rotating file setup for a named channel
//!
//! A [`LogDelegate`] configures one channel to print bare messages to stdout
//! and write detailed records to a rotating log file, each with its own
//! threshold. Everything else is forwarded to the channel through [`Emit`].

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::emit::Emit;
use super::level::Severity;
use super::registry::{Logger, LoggerRegistry};
use super::sink::{ConsoleSink, RotatingFileSink, Sink};
use crate::config::DelegateConfig;
use crate::error::{Result, SetupError};

/// Default log file path when none is given
///
/// This names a directory, so a delegate built with it fails to open its
/// file sink. Callers are expected to always pass an explicit file path.
pub const DEFAULT_FILE_PATH: &str = ".";

/// A channel wired to a console sink and one or more rotating file sinks
///
/// The [`Emit`] helper methods (`info`, `log`, ...) record the caller's file
/// and line but not its function, which is written as `<unknown>`. Emit
/// through `splitlog::info!`/`splitlog::log!` to get the function name too.
pub struct LogDelegate {
    logger: Arc<Logger>,
    console: Arc<ConsoleSink>,
    file_sinks: Vec<Arc<RotatingFileSink>>,
}

impl LogDelegate {
    /// Build a delegate for `name` with all defaults
    pub fn new(registry: &LoggerRegistry, name: impl Into<String>) -> Result<Self> {
        Self::builder(name).build(registry)
    }

    /// Start configuring a delegate for the channel `name`
    pub fn builder(name: impl Into<String>) -> LogDelegateBuilder {
        LogDelegateBuilder::new(name)
    }

    /// Build a delegate from a loaded configuration
    pub fn from_config(registry: &LoggerRegistry, config: &DelegateConfig) -> Result<Self> {
        Self::builder(config.name.clone())
            .print_level(config.print_level)
            .file_path(config.resolved_file_path()?)
            .file_level(config.file_level)
            .build(registry)
    }

    /// Change the console sink's threshold
    pub fn set_console_threshold(&self, level: Severity) {
        self.console.set_threshold(level);
    }

    pub fn console_threshold(&self) -> Severity {
        self.console.threshold()
    }

    /// Attach a rotating file sink for `path` at `level`
    ///
    /// This adds a sink; it does not replace the one attached at
    /// construction. After a second call every record is written to both
    /// files. That is almost certainly not what a caller reconfiguring the
    /// log file wants, but existing callers depend on it.
    pub fn set_file_sink(&mut self, path: impl AsRef<Path>, level: Severity) -> Result<()> {
        let sink = Arc::new(RotatingFileSink::open(path, level)?);
        self.attach_file_sink(sink);
        Ok(())
    }

    /// The channel identity this delegate writes to
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn console_sink(&self) -> &Arc<ConsoleSink> {
        &self.console
    }

    /// File sinks in attachment order; the last one is the most recent
    pub fn file_sinks(&self) -> &[Arc<RotatingFileSink>] {
        &self.file_sinks
    }

    fn attach_file_sink(&mut self, sink: Arc<RotatingFileSink>) {
        tracing::debug!(
            channel = %self.logger.name(),
            path = %sink.path().display(),
            threshold = %sink.threshold(),
            "Attached file sink"
        );
        self.logger.add_sink(Arc::clone(&sink) as Arc<dyn Sink>);
        self.file_sinks.push(sink);
    }
}

impl Emit for LogDelegate {
    fn channel(&self) -> &Logger {
        &self.logger
    }
}

impl std::fmt::Debug for LogDelegate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogDelegate")
            .field("logger", &self.logger)
            .field("console", &self.console)
            .field("file_sinks", &self.file_sinks)
            .finish()
    }
}

/// Builder for [`LogDelegate`]
pub struct LogDelegateBuilder {
    name: String,
    print_level: Severity,
    file_path: PathBuf,
    file_level: Severity,
    console_writer: Option<Box<dyn Write + Send>>,
}

impl LogDelegateBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            print_level: Severity::Info,
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            file_level: Severity::Info,
            console_writer: None,
        }
    }

    /// Threshold of the console sink (default INFO)
    pub fn print_level(mut self, level: Severity) -> Self {
        self.print_level = level;
        self
    }

    /// Path of the rotating log file
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Threshold of the file sink (default INFO)
    pub fn file_level(mut self, level: Severity) -> Self {
        self.file_level = level;
        self
    }

    /// Send console output to `writer` instead of stdout
    pub fn console_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console_writer = Some(Box::new(writer));
        self
    }

    /// Create the delegate and attach its sinks to the channel in `registry`
    ///
    /// The file sink is opened before anything is attached, so a failure
    /// leaves the channel's sinks untouched.
    pub fn build(self, registry: &LoggerRegistry) -> Result<LogDelegate> {
        if self.name.is_empty() {
            return Err(SetupError::configuration("channel name must not be empty"));
        }

        let file_sink = Arc::new(RotatingFileSink::open(&self.file_path, self.file_level)?);

        let logger = registry.get_or_create(&self.name);
        logger.set_level(Severity::lowest());

        let console = Arc::new(match self.console_writer {
            Some(writer) => ConsoleSink::with_writer(writer, self.print_level),
            None => ConsoleSink::stdout(self.print_level),
        });
        logger.add_sink(Arc::clone(&console) as Arc<dyn Sink>);

        let mut delegate = LogDelegate {
            logger,
            console,
            file_sinks: Vec::new(),
        };
        delegate.attach_file_sink(file_sink);
        Ok(delegate)
    }
}
