//! Call-site adapter that folds keyword arguments into extra fields
//!
//! An [`ExtraAdapter`] wraps a named [`Logger`] together with a set of default
//! fields. Every call merges its keyword arguments over a fresh copy of those
//! defaults, pulls out the reserved control parameters, and hands the result
//! to the logger.
//!
//! # Example
//!
//! ```
//! use extra_adapter::prelude::*;
//!
//! let adapter = ExtraAdapter::builder("quickstart")
//!     .default_field("service", "billing")
//!     .appender(ConsoleAppender::new())
//!     .build();
//!
//! adapter.info("invoice sent", fields! { invoice = "INV-7", amount = 120 })?;
//! adapter.info("default only", Fields::new())?;
//! # Ok::<(), extra_adapter::LoggerError>(())
//! ```

use crate::core::{
    is_control_param, registry, Appender, ControlParams, Fields, LogLevel, Logger, LoggerError,
    Message, Result,
};
use std::error::Error;
use std::fmt::Write;
use std::panic::Location;
use std::sync::Arc;

/// Split `kwargs` into control parameters and extra fields.
///
/// The extra mapping starts as a copy of `default_extra`; each non-control
/// keyword is then inserted in caller order, overwriting a default of the same
/// name. Neither input is modified and the message is passed through as-is.
pub fn merge<M>(message: M, kwargs: &Fields, default_extra: &Fields) -> (M, ControlParams, Fields) {
    let mut extra = default_extra.clone();
    let mut control = ControlParams::new();

    for (key, value) in kwargs.iter() {
        if is_control_param(key) {
            control.insert(key, value.clone());
        } else {
            extra.insert(key, value.clone());
        }
    }

    (message, control, extra)
}

/// Render an error and its `source()` chain as `outer: inner: root`
fn describe_error<E: Error + ?Sized>(error: &E) -> Result<String> {
    let render_failed =
        |_| LoggerError::control_parameter("exc_info", "error could not be rendered");

    let mut rendered = String::new();
    write!(rendered, "{}", error).map_err(render_failed)?;
    let mut source = error.source();
    while let Some(cause) = source {
        write!(rendered, ": {}", cause).map_err(render_failed)?;
        source = cause.source();
    }
    Ok(rendered)
}

/// A logger handle that attaches default and per-call extra fields.
///
/// Cloning is cheap and clones share the same logger and default fields.
#[derive(Debug, Clone)]
pub struct ExtraAdapter {
    logger: Arc<Logger>,
    extra: Arc<Fields>,
}

impl ExtraAdapter {
    pub fn new(logger: Arc<Logger>, default_extra: Fields) -> Self {
        Self {
            logger,
            extra: Arc::new(default_extra),
        }
    }

    /// Configure an adapter over the registry logger called `name`
    pub fn builder(name: impl Into<String>) -> AdapterBuilder {
        AdapterBuilder::new(name)
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn name(&self) -> &str {
        self.logger.name()
    }

    pub fn default_extra(&self) -> &Fields {
        &self.extra
    }

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.logger.is_enabled_for(level)
    }

    /// Merge one call's keyword arguments with this adapter's defaults
    pub fn process<M>(&self, message: M, kwargs: &Fields) -> (M, ControlParams, Fields) {
        merge(message, kwargs, &self.extra)
    }

    /// Log at `level`.
    ///
    /// Disabled levels return immediately without merging. Errors raised while
    /// building the record (a reserved extra key, a malformed control
    /// parameter) are returned unchanged.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<Message>, kwargs: Fields) -> Result<()> {
        if !self.is_enabled_for(level) {
            self.logger.metrics().record_filtered();
            return Ok(());
        }

        let (message, control, extra) = self.process(message.into(), &kwargs);
        self.logger.handle(level, message, &control, extra, Location::caller())
    }

    #[track_caller]
    #[inline]
    pub fn trace(&self, message: impl Into<Message>, kwargs: Fields) -> Result<()> {
        self.log(LogLevel::Trace, message, kwargs)
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, message: impl Into<Message>, kwargs: Fields) -> Result<()> {
        self.log(LogLevel::Debug, message, kwargs)
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, message: impl Into<Message>, kwargs: Fields) -> Result<()> {
        self.log(LogLevel::Info, message, kwargs)
    }

    #[track_caller]
    #[inline]
    pub fn warning(&self, message: impl Into<Message>, kwargs: Fields) -> Result<()> {
        self.log(LogLevel::Warning, message, kwargs)
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, message: impl Into<Message>, kwargs: Fields) -> Result<()> {
        self.log(LogLevel::Error, message, kwargs)
    }

    #[track_caller]
    #[inline]
    pub fn critical(&self, message: impl Into<Message>, kwargs: Fields) -> Result<()> {
        self.log(LogLevel::Critical, message, kwargs)
    }

    /// Log at `Error` with `exc_info` set to `error` and its source chain
    #[track_caller]
    pub fn exception<E>(
        &self,
        message: impl Into<Message>,
        error: &E,
        mut kwargs: Fields,
    ) -> Result<()>
    where
        E: Error + ?Sized,
    {
        if !self.is_enabled_for(LogLevel::Error) {
            self.logger.metrics().record_filtered();
            return Ok(());
        }
        kwargs.insert("exc_info", describe_error(error)?);
        self.log(LogLevel::Error, message, kwargs)
    }

    pub fn flush(&self) -> Result<()> {
        self.logger.flush()
    }
}

/// Builder for an [`ExtraAdapter`] over a registry logger.
///
/// Appenders are added to the shared logger and the level is applied to it,
/// so every adapter for the same name sees them.
pub struct AdapterBuilder {
    name: String,
    level: LogLevel,
    default_extra: Fields,
    appenders: Vec<Box<dyn Appender>>,
}

impl AdapterBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::Info,
            default_extra: Fields::new(),
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Replace the default extra fields
    #[must_use = "builder methods return a new value"]
    pub fn default_extra(mut self, default_extra: Fields) -> Self {
        self.default_extra = default_extra;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<crate::core::FieldValue>,
    {
        self.default_extra.insert(key, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    pub fn build(self) -> ExtraAdapter {
        let logger = registry::get(&self.name);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger.set_min_level(self.level);
        ExtraAdapter::new(logger, self.default_extra)
    }
}

/// Return the registry logger `name` wrapped in an [`ExtraAdapter`].
///
/// Two calls with the same name share one logger: the appenders passed here
/// are added to it and its level is set to `level`.
pub fn get_logger(
    name: &str,
    level: LogLevel,
    default_extra: Option<Fields>,
    appenders: Vec<Box<dyn Appender>>,
) -> ExtraAdapter {
    appenders
        .into_iter()
        .fold(ExtraAdapter::builder(name).level(level), |builder, appender| {
            builder.boxed_appender(appender)
        })
        .default_extra(default_extra.unwrap_or_default())
        .build()
}
