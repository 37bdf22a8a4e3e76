//! Logging channels for splitlog
//!
//! Provides named channels with independently filtered console and rotating
//! file sinks, the delegate that wires them up, and a bridge from `tracing`
//! events into channels.

mod delegate;
mod emit;
mod format;
mod layer;
mod level;
mod macros;
mod record;
mod registry;
pub mod rotation;
mod sink;

#[cfg(test)]
pub(crate) mod test_support;

pub use delegate::{LogDelegate, LogDelegateBuilder, DEFAULT_FILE_PATH};
pub use emit::Emit;
pub use format::{RecordFormat, TIMESTAMP_FORMAT};
pub use layer::ChannelLayer;
pub use level::Severity;
pub use record::{Callsite, LogRecord, UNKNOWN_FUNCTION};
pub use registry::{Logger, LoggerRegistry};
pub use sink::{ConsoleSink, RotatingFileSink, Sink};

#[doc(hidden)]
pub use record::trim_function_path;
