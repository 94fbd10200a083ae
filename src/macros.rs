//! Logging macros for ergonomic field and message construction.
//!
//! Messages are formatted like `format!`. Extra fields follow a `;` as
//! `key = value` pairs, where any value convertible into a
//! [`FieldValue`](crate::FieldValue) is accepted.
//!
//! # Examples
//!
//! ```
//! use extra_adapter::prelude::*;
//! use extra_adapter::{info, warning};
//!
//! let log = ExtraAdapter::builder("macros.doc")
//!     .appender(ConsoleAppender::new())
//!     .build();
//!
//! // Plain message
//! info!(log, "Server started")?;
//!
//! // With format arguments
//! let port = 8080;
//! info!(log, "Listening on port {}", port)?;
//!
//! // With extra fields
//! warning!(log, "Slow request"; path = "/orders", elapsed_ms = 1840)?;
//! warning!(log, "Retry {} of {}", 2, 5; job = "sync")?;
//! # Ok::<(), extra_adapter::LoggerError>(())
//! ```

/// Build a [`Fields`](crate::Fields) mapping from `key = value` pairs, in order.
///
/// ```
/// use extra_adapter::fields;
///
/// let extra = fields! { user = "alice", attempts = 3 };
/// assert_eq!(extra.keys().collect::<Vec<_>>(), vec!["user", "attempts"]);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(stringify!($key), $value);
        )+
        fields
    }};
}

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use extra_adapter::prelude::*;
/// # let log = ExtraAdapter::builder("macros.log").build();
/// use extra_adapter::log;
/// log!(log, LogLevel::Info, "Simple message")?;
/// log!(log, LogLevel::Error, "Error code: {}", 500)?;
/// log!(log, LogLevel::Warning, "Disk low"; free_mb = 120)?;
/// log!(log, LogLevel::Info, Message::new("{} items").arg(3); batch = 9)?;
/// # Ok::<(), extra_adapter::LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($adapter:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),* $(,)?) => {
        $adapter.log($level, format!($fmt $(, $arg)*), $crate::fields!($($key = $value),*))
    };
    ($adapter:expr, $level:expr, $msg:expr ; $($key:ident = $value:expr),* $(,)?) => {
        $adapter.log($level, $msg, $crate::fields!($($key = $value),*))
    };
    ($adapter:expr, $level:expr, $($arg:tt)+) => {
        $adapter.log($level, format!($($arg)+), $crate::Fields::new())
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use extra_adapter::prelude::*;
/// # let log = ExtraAdapter::builder("macros.trace").level(LogLevel::Trace).build();
/// use extra_adapter::trace;
/// trace!(log, "Entering function: calculate()")?;
/// trace!(log, "Variable value: {}", 42)?;
/// # Ok::<(), extra_adapter::LoggerError>(())
/// ```
#[macro_export]
macro_rules! trace {
    ($adapter:expr, $($arg:tt)+) => {
        $crate::log!($adapter, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($adapter:expr, $($arg:tt)+) => {
        $crate::log!($adapter, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use extra_adapter::prelude::*;
/// # let log = ExtraAdapter::builder("macros.info").build();
/// use extra_adapter::info;
/// info!(log, "Application started")?;
/// info!(log, "Processing {} items", 100; queue = "high")?;
/// # Ok::<(), extra_adapter::LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($adapter:expr, $($arg:tt)+) => {
        $crate::log!($adapter, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($adapter:expr, $($arg:tt)+) => {
        $crate::log!($adapter, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use extra_adapter::prelude::*;
/// # let log = ExtraAdapter::builder("macros.error").build();
/// use extra_adapter::error;
/// error!(log, "Failed to connect to database"; host = "db-1")?;
/// error!(log, "Error code: {}, message: {}", 500, "Internal error")?;
/// # Ok::<(), extra_adapter::LoggerError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($adapter:expr, $($arg:tt)+) => {
        $crate::log!($adapter, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($adapter:expr, $($arg:tt)+) => {
        $crate::log!($adapter, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::adapter::ExtraAdapter;
    use crate::core::{Appender, FieldValue, Fields, LogLevel, LogRecord, Logger, Message, Result};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<LogRecord>>>);

    impl Appender for Capture {
        fn append(&mut self, record: &LogRecord) -> Result<()> {
            self.0.lock().push(record.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    fn adapter(name: &str) -> (ExtraAdapter, Capture) {
        let capture = Capture::default();
        let logger = Logger::builder(name)
            .min_level(LogLevel::Trace)
            .appender(capture.clone())
            .build();
        (ExtraAdapter::new(Arc::new(logger), Fields::new()), capture)
    }

    #[test]
    fn test_fields_macro() {
        assert!(fields!().is_empty());

        let extra = fields! { user = "alice", attempts = 3, ok = true, };
        let keys: Vec<&str> = extra.keys().collect();
        assert_eq!(keys, vec!["user", "attempts", "ok"]);
        assert_eq!(extra.get("attempts"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn test_log_macro_forms() {
        let (log, capture) = adapter("macros.forms");

        log!(log, LogLevel::Info, "Test message").unwrap();
        log!(log, LogLevel::Info, "Formatted: {}", 42).unwrap();
        log!(log, LogLevel::Info, "With fields"; code = 7).unwrap();
        log!(log, LogLevel::Info, "Both {}", "ways"; code = 8, tag = "t").unwrap();
        log!(log, LogLevel::Info, Message::new("{} deferred").arg(1); code = 9).unwrap();

        let records = capture.0.lock();
        let messages: Vec<String> = records
            .iter()
            .map(|r| r.message().unwrap().into_owned())
            .collect();
        assert_eq!(
            messages,
            vec!["Test message", "Formatted: 42", "With fields", "Both ways", "1 deferred"]
        );
        assert!(records[1].extra().is_empty());
        assert_eq!(records[3].extra().get("tag"), Some(&FieldValue::from("t")));
        assert_eq!(records[4].extra().get("code"), Some(&FieldValue::Int(9)));
    }

    #[test]
    fn test_level_macros() {
        let (log, capture) = adapter("macros.levels");

        trace!(log, "trace").unwrap();
        debug!(log, "debug {}", 1).unwrap();
        info!(log, "info"; k = 1).unwrap();
        warning!(log, "warning").unwrap();
        error!(log, "error {}", 2; k = 2).unwrap();
        critical!(log, "critical").unwrap();

        let levels: Vec<LogLevel> = capture.0.lock().iter().map(|r| r.level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_macro_control_parameters() {
        let (log, capture) = adapter("macros.control");

        error!(log, "failed"; exc_info = "timeout", attempt = 3).unwrap();

        let records = capture.0.lock();
        assert_eq!(records[0].exc_info.as_deref(), Some("timeout"));
        assert!(!records[0].extra().contains_key("exc_info"));
        assert_eq!(records[0].extra().get("attempt"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn test_macro_records_call_site() {
        let (log, capture) = adapter("macros.site");

        let line = line!() + 1;
        info!(log, "here").unwrap();

        assert_eq!(capture.0.lock()[0].lineno, Some(line));
    }
}
