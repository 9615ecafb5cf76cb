//! Call-site logging macros
//!
//! These macros tag a record with the invoking function's path, file and
//! line, independent of how many wrapper layers sit between the caller and
//! the sink.

/// Strip the helper suffix and closure segments from a `type_name` path
#[doc(hidden)]
pub fn __function_path(raw: &'static str) -> &'static str {
    let mut path = raw.strip_suffix("::__fieldlog_here").unwrap_or(raw);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path
}

/// Capture the current call site
///
/// # Example
///
/// ```
/// fn handle_request() -> fieldlog_logging::CallSite {
///     fieldlog_logging::call_site!()
/// }
///
/// let site = handle_request();
/// assert!(site.function.unwrap().ends_with("handle_request"));
/// assert_eq!(site.file, file!());
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __fieldlog_here() {}
        fn __fieldlog_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::CallSite::new(
            $crate::macros::__function_path(__fieldlog_type_name_of(__fieldlog_here)),
            file!(),
            line!(),
        )
    }};
}

/// Log at `DEBUG` with call-site tagging
///
/// ```
/// # use std::sync::Arc;
/// # use fieldlog_logging::{LogFacade, LoggingConfig, StreamSink};
/// # let facade = LogFacade::init(&LoggingConfig::default(), Arc::new(StreamSink::stderr()), None);
/// let mut logger = facade.logger();
/// fieldlog_logging::debug!(logger, "cache warm, {} entries", 42);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_at($crate::Severity::Debug, $crate::call_site!(), ::std::format!($($arg)+))
    };
}

/// Log at `INFO` with call-site tagging
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_at($crate::Severity::Info, $crate::call_site!(), ::std::format!($($arg)+))
    };
}

/// Log at `WARNING` with call-site tagging
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_at($crate::Severity::Warning, $crate::call_site!(), ::std::format!($($arg)+))
    };
}

/// Log at `ERROR` with call-site tagging
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_at($crate::Severity::Error, $crate::call_site!(), ::std::format!($($arg)+))
    };
}

/// Record a `PANIC` entry with call-site tagging, then panic
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic_at($crate::call_site!(), ::std::format!($($arg)+))
    };
}
