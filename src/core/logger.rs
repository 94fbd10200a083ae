//! Named logger: record creation, level filtering and appender dispatch

use super::{
    appender::Appender,
    control::ControlParams,
    error::Result,
    fields::Fields,
    log_level::LogLevel,
    log_record::LogRecord,
    message::Message,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic::Location;

thread_local! {
    // Addresses of the loggers dispatching on this thread
    static DISPATCHING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a logger as dispatching on the current thread until dropped.
///
/// A record logged while one of the logger's own appenders is formatting
/// (a field's `Display` that logs, for instance) would otherwise wait on the
/// appender lock its own thread holds.
struct DispatchGuard {
    key: usize,
}

impl DispatchGuard {
    fn enter(logger: &Logger) -> Option<Self> {
        let key = logger as *const Logger as usize;
        DISPATCHING.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&key) {
                None
            } else {
                active.push(key);
                Some(Self { key })
            }
        })
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        let _ = DISPATCHING.try_with(|active| active.borrow_mut().retain(|key| *key != self.key));
    }
}

pub struct Logger {
    name: String,
    min_level: RwLock<LogLevel>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    /// Metrics for observability (dropped count, total logged, etc.)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a standalone logger.
    ///
    /// Use [`registry::get`](super::registry::get) to obtain the shared logger
    /// for a name instead.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(LogLevel::Info),
            appenders: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    /// Build a record from an already merged call.
    ///
    /// Control parameters are interpreted here: `exc_info` is attached,
    /// `stack_info` captures a backtrace, and `stacklevel` is validated (the
    /// source location always comes from `location`). Extras that would shadow
    /// an intrinsic attribute are rejected.
    pub fn make_record(
        &self,
        level: LogLevel,
        message: Message,
        control: &ControlParams,
        extra: Fields,
        location: &Location<'_>,
    ) -> Result<LogRecord> {
        let exc_info = control.exc_info()?;
        let capture_stack = control.stack_info()?;
        control.stacklevel()?;

        let mut record = LogRecord::new(self.name.as_str(), level, message)
            .with_location(location.file(), location.line())
            .with_extra(extra)?;

        if let Some(exc_info) = exc_info {
            record = record.with_exc_info(exc_info);
        }
        if capture_stack {
            record = record.with_stack_info(Backtrace::force_capture().to_string());
        }
        Ok(record)
    }

    /// Filter, build and dispatch one call.
    ///
    /// Calls below the level threshold return `Ok(())` without building a
    /// record. Errors from record creation are returned to the caller; appender
    /// failures are reported on stderr and counted as dropped.
    pub fn handle(
        &self,
        level: LogLevel,
        message: Message,
        control: &ControlParams,
        extra: Fields,
        location: &Location<'_>,
    ) -> Result<()> {
        if !self.is_enabled_for(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let record = match self.make_record(level, message, control, extra, location) {
            Ok(record) => record,
            Err(e) => {
                self.metrics.record_rejected();
                return Err(e);
            }
        };

        self.dispatch(&record);
        Ok(())
    }

    /// Deliver a finished record to every appender.
    ///
    /// A record logged from inside this logger's own dispatch on the same
    /// thread is reported on stderr and counted as dropped.
    pub fn dispatch(&self, record: &LogRecord) {
        let Some(_guard) = DispatchGuard::enter(self) else {
            eprintln!(
                "[LOGGER ERROR] Logger '{}' dropped a record logged during its own dispatch: {}",
                self.name, record.msg
            );
            self.metrics.record_dropped();
            return;
        };

        let mut appenders = self.appenders.write();
        Self::process_sync(&mut appenders, record, &self.metrics);
    }

    /// Process a record with per-appender panic isolation
    ///
    /// One failing appender doesn't prevent the others from receiving the
    /// record.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        record: &LogRecord,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx, panic_msg
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }

        has_error
    }

    /// Get the number of records an appender failed to write
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level())
            .field("appenders", &self.appender_count())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' shutting down with {} dropped logs (drop rate: {:.2}%)",
                self.name,
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for a standalone [`Logger`]
///
/// # Example
/// ```
/// use extra_adapter::prelude::*;
///
/// let logger = Logger::builder("worker")
///     .min_level(LogLevel::Debug)
///     .appender(ConsoleAppender::new())
///     .build();
/// assert!(logger.is_enabled_for(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: LogLevel::Info,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name);
        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Logger {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}
