//! The emit surface shared by channels and delegates

use std::fmt;

use super::level::Severity;
use super::record::{Callsite, LogRecord};
use super::registry::Logger;

/// Operations for emitting records into a channel and inspecting it
///
/// Implementors only name the channel they write to; every operation
/// forwards to it. The severity helpers capture the caller's file and line
/// via `#[track_caller]`; the `info!`-style macros also capture the
/// enclosing function name.
pub trait Emit {
    /// The channel records are emitted into
    fn channel(&self) -> &Logger;

    /// Emit a record with an explicit callsite
    fn emit(&self, severity: Severity, callsite: Callsite, args: fmt::Arguments<'_>) {
        let logger = self.channel();
        if !logger.is_enabled_for(severity) {
            return;
        }
        let record = LogRecord::new(logger.name(), severity, callsite, fmt::format(args));
        logger.handle(&record);
    }

    #[track_caller]
    fn log(&self, severity: Severity, message: impl fmt::Display) {
        self.emit(severity, Callsite::caller(), format_args!("{}", message));
    }

    #[track_caller]
    fn debug(&self, message: impl fmt::Display) {
        self.emit(Severity::Debug, Callsite::caller(), format_args!("{}", message));
    }

    #[track_caller]
    fn info(&self, message: impl fmt::Display) {
        self.emit(Severity::Info, Callsite::caller(), format_args!("{}", message));
    }

    #[track_caller]
    fn warning(&self, message: impl fmt::Display) {
        self.emit(Severity::Warning, Callsite::caller(), format_args!("{}", message));
    }

    #[track_caller]
    fn error(&self, message: impl fmt::Display) {
        self.emit(Severity::Error, Callsite::caller(), format_args!("{}", message));
    }

    #[track_caller]
    fn critical(&self, message: impl fmt::Display) {
        self.emit(Severity::Critical, Callsite::caller(), format_args!("{}", message));
    }

    fn name(&self) -> &str {
        self.channel().name()
    }

    fn level(&self) -> Severity {
        self.channel().level()
    }

    fn is_enabled_for(&self, severity: Severity) -> bool {
        self.channel().is_enabled_for(severity)
    }

    fn flush(&self) {
        self.channel().flush();
    }
}

impl Emit for Logger {
    fn channel(&self) -> &Logger {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::registry::LoggerRegistry;
    use crate::logging::sink::{ConsoleSink, RotatingFileSink};
    use crate::logging::test_support::SharedBuffer;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_helpers_emit_at_their_severity() {
        let registry = LoggerRegistry::new();
        let logger = registry.get_or_create("app");
        logger.set_level(Severity::Debug);
        let buffer = SharedBuffer::default();
        logger.add_sink(Arc::new(ConsoleSink::with_writer(
            Box::new(buffer.clone()),
            Severity::Warning,
        )));

        Emit::debug(&*logger, "d");
        Emit::info(&*logger, "i");
        Emit::warning(&*logger, "w");
        Emit::error(&*logger, "e");
        Emit::critical(&*logger, "c");
        Emit::log(&*logger, Severity::Error, format_args!("{}-{}", "x", 1));

        assert_eq!(buffer.lines(), vec!["w", "e", "c", "x-1"]);
    }

    #[test]
    fn test_track_caller_records_this_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");

        let registry = LoggerRegistry::new();
        let logger = registry.get_or_create("app");
        logger.add_sink(Arc::new(RotatingFileSink::open(&path, Severity::Debug).unwrap()));

        Emit::warning(&*logger, "located");
        let line = line!() - 1;

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(&format!("|emit@{}:<unknown> located", line)));
    }

    #[test]
    fn test_gated_records_are_not_formatted() {
        let registry = LoggerRegistry::new();
        let logger = registry.get_or_create("app");
        let buffer = SharedBuffer::default();
        logger.add_sink(Arc::new(ConsoleSink::with_writer(
            Box::new(buffer.clone()),
            Severity::Debug,
        )));

        assert!(!Emit::is_enabled_for(&*logger, Severity::Info));
        Emit::info(&*logger, "dropped");
        assert!(buffer.contents().is_empty());
    }
}
