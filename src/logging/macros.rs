//! Emit macros that capture the full callsite
//!
//! ```ignore
//! splitlog::info!(delegate, "synced {} files", count);
//! splitlog::log!(delegate, Severity::Warning, "retrying {}", attempt);
//! ```

/// Capture the file, line and enclosing function of the invocation
#[macro_export]
macro_rules! callsite {
    () => {{
        fn __splitlog_marker() {}
        fn __splitlog_type_name<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::logging::Callsite::new(
            ::std::file!(),
            ::std::line!(),
            $crate::logging::trim_function_path(__splitlog_type_name(__splitlog_marker)),
        )
    }};
}

/// Emit a record at a runtime severity
#[macro_export]
macro_rules! log {
    ($target:expr, $severity:expr, $($arg:tt)+) => {{
        use $crate::logging::Emit as _;
        ($target).emit($severity, $crate::callsite!(), ::std::format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! debug {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::logging::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::logging::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::logging::Severity::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::logging::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::logging::Severity::Critical, $($arg)+)
    };
}
