//! splitlog - named log channels that print to stdout and write a rotating log file
//!
//! ```ignore
//! use splitlog::logging::{LogDelegate, LoggerRegistry, Severity};
//!
//! let registry = LoggerRegistry::new();
//! let log = LogDelegate::builder("sync")
//!     .file_path("logs/sync.log")
//!     .file_level(Severity::Debug)
//!     .build(&registry)?;
//! splitlog::info!(log, "started");
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Result, SetupError};
pub use logging::{Emit, LogDelegate, LoggerRegistry, Severity};
