//! Severity levels and per-sink thresholds

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Ordered record severity
///
/// The discriminants follow the conventional 10-step numbering so numeric
/// levels from configuration files keep their usual meaning.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "SeverityRepr", into = "String")]
pub enum Severity {
    Debug = 10,
    #[default]
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// The lowest severity; a channel gated here discards nothing
    pub const fn lowest() -> Self {
        Severity::Debug
    }

    /// Upper-case level name as written to log files
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Numeric value of this severity
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Look up a severity by its numeric value
    pub fn from_value(value: u32) -> Option<Self> {
        Severity::ALL
            .into_iter()
            .find(|severity| u32::from(severity.value()) == value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, SetupError> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u32>() {
            return Severity::try_from(value);
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" | "FATAL" => Ok(Severity::Critical),
            _ => Err(SetupError::configuration(format!(
                "unknown severity level: {:?}",
                s
            ))),
        }
    }
}

impl TryFrom<u32> for Severity {
    type Error = SetupError;

    fn try_from(value: u32) -> Result<Self, SetupError> {
        Severity::from_value(value).ok_or_else(|| {
            SetupError::configuration(format!("unknown severity level: {}", value))
        })
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

/// Accepted serialized forms: a level name or its numeric value
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Name(String),
    Value(u32),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = SetupError;

    fn try_from(repr: SeverityRepr) -> Result<Self, SetupError> {
        match repr {
            SeverityRepr::Name(name) => name.parse(),
            SeverityRepr::Value(value) => Severity::try_from(value),
        }
    }
}

/// A severity that can be changed while other threads read it
#[derive(Debug)]
pub struct SeverityCell(AtomicU8);

impl SeverityCell {
    pub fn new(severity: Severity) -> Self {
        Self(AtomicU8::new(severity.value()))
    }

    pub fn get(&self) -> Severity {
        Severity::from_value(u32::from(self.0.load(Ordering::Relaxed)))
            .unwrap_or_else(Severity::lowest)
    }

    pub fn set(&self, severity: Severity) {
        self.0.store(severity.value(), Ordering::Relaxed);
    }
}
