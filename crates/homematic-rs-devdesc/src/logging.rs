// crates/homematic-rs-devdesc/src/logging.rs

//! Logging macros that prefix each line with the parameter it concerns.
//!
//! The engine only talks to the `log` facade. Which logger receives the
//! records is decided by the embedding application.

/// Trait for values that provide metadata for log lines.
pub trait LogMetadata {
    fn meta(&self) -> String;
}

impl<T: LogMetadata + ?Sized> LogMetadata for &T {
    fn meta(&self) -> String {
        (**self).meta()
    }
}

// =============================================
// Logging Macros (namespaced under crate::logging)
// =============================================

// ===== dd_warn! =====
macro_rules! dd_warn {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::logging::LogMetadata::meta(&$ctx);
        ::log::warn!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
    ($fmt:literal $(, $($arg:tt)+)?) => {{
        ::log::warn!($fmt $(, $($arg)+)?);
    }};
}

// ===== dd_error! =====
macro_rules! dd_error {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::logging::LogMetadata::meta(&$ctx);
        ::log::error!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
    ($fmt:literal $(, $($arg:tt)+)?) => {{
        ::log::error!($fmt $(, $($arg)+)?);
    }};
}

// ===== dd_debug! =====
macro_rules! dd_debug {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::logging::LogMetadata::meta(&$ctx);
        ::log::debug!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
    ($fmt:literal $(, $($arg:tt)+)?) => {{
        ::log::debug!($fmt $(, $($arg)+)?);
    }};
}

// ===== dd_trace! =====
macro_rules! dd_trace {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::logging::LogMetadata::meta(&$ctx);
        ::log::trace!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
    ($fmt:literal $(, $($arg:tt)+)?) => {{
        ::log::trace!($fmt $(, $($arg)+)?);
    }};
}

// Re-export macros for use in other files
pub(crate) use dd_debug;
pub(crate) use dd_error;
pub(crate) use dd_trace;
pub(crate) use dd_warn;
