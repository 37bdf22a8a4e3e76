//! Named channel identities and the registry that hands them out
//!
//! A [`LoggerRegistry`] is created once at startup and passed to whatever
//! builds delegates. Looking up the same name twice yields the same
//! [`Logger`], so every delegate for a channel shares its sinks.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::level::{Severity, SeverityCell};
use super::record::LogRecord;
use super::sink::Sink;

/// A named logical channel of log records
///
/// The channel's own level gates records before any sink sees them; each
/// attached sink then applies its own threshold.
pub struct Logger {
    name: String,
    level: SeverityCell,
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
}

impl Logger {
    /// Level a freshly created channel starts at
    pub const DEFAULT_LEVEL: Severity = Severity::Warning;

    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: SeverityCell::new(Self::DEFAULT_LEVEL),
            sinks: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gating level of the channel itself
    pub fn level(&self) -> Severity {
        self.level.get()
    }

    pub fn set_level(&self, level: Severity) {
        self.level.set(level);
    }

    /// Whether a record of `severity` would get past the channel's gate
    pub fn is_enabled_for(&self, severity: Severity) -> bool {
        severity >= self.level()
    }

    /// Attach a sink; sinks are invoked in attachment order
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks
            .read()
            .map(|sinks| sinks.len())
            .unwrap_or(0)
    }

    pub fn has_sinks(&self) -> bool {
        self.sink_count() > 0
    }

    /// Dispatch `record` to every attached sink in attachment order
    ///
    /// A failing sink is reported and skipped; the remaining sinks still
    /// receive the record.
    pub fn handle(&self, record: &LogRecord) {
        if !self.is_enabled_for(record.severity) {
            return;
        }

        for sink in self.snapshot() {
            if let Err(e) = sink.handle(record) {
                tracing::warn!(channel = %self.name, error = %e, "Failed to write log record");
            }
        }
    }

    /// Flush every attached sink
    pub fn flush(&self) {
        for sink in self.snapshot() {
            if let Err(e) = sink.flush() {
                tracing::warn!(channel = %self.name, error = %e, "Failed to flush log sink");
            }
        }
    }

    fn snapshot(&self) -> Vec<Arc<dyn Sink>> {
        self.sinks
            .read()
            .map(|sinks| sinks.clone())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("sinks", &self.sink_count())
            .finish()
    }
}

/// Name-keyed registry of channel identities
#[derive(Default)]
pub struct LoggerRegistry {
    channels: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the channel called `name`, creating it on first use
    pub fn get_or_create(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.get(name) {
            return logger;
        }

        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(channels.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(channel = name, "Created log channel");
            Arc::new(Logger::new(name))
        }))
    }

    /// Look up an existing channel without creating it
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.channels
            .read()
            .ok()
            .and_then(|channels| channels.get(name).cloned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of all channels created so far, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .channels
            .read()
            .map(|channels| channels.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.channels.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("channels", &self.names())
            .finish()
    }
}
