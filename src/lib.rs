//! # Extra Adapter
//!
//! Structured fields for named loggers.
//!
//! An [`ExtraAdapter`] binds default fields to a logger and merges per-call
//! keyword fields over them. Appenders then render each record with one of two
//! formatters:
//!
//! - **Text**: `message: field=value  field=value`
//! - **JSON**: one flat object, `"message"` first, values as strings
//!
//! Only the extra fields and four meta attributes (`filename`, `levelname`,
//! `name`, `lineno`) reach the output; the record's other built-in attributes
//! are suppressed.
//!
//! ```
//! use extra_adapter::prelude::*;
//! use extra_adapter::{fields, info};
//!
//! let log = get_logger(
//!     "payments",
//!     LogLevel::Info,
//!     Some(fields! { service = "payments" }),
//!     vec![Box::new(ConsoleAppender::new().with_output_format(OutputFormat::Json))],
//! );
//!
//! info!(log, "charge captured"; amount = 1250, currency = "EUR")?;
//! # Ok::<(), extra_adapter::LoggerError>(())
//! ```

pub mod adapter;
pub mod appenders;
pub mod config;
pub mod core;
pub mod formatters;
pub mod macros;

pub mod prelude {
    pub use crate::adapter::{get_logger, merge, AdapterBuilder, ExtraAdapter};
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::config::{AdapterConfig, AppenderConfig};
    pub use crate::core::{
        Appender, ControlParams, FieldValue, Fields, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, Message, OutputFormat, Result,
    };
    pub use crate::fields;
    pub use crate::formatters::{Formatter, JsonFormatter, StringFormatter};
}

pub use adapter::{get_logger, merge, AdapterBuilder, ExtraAdapter};
pub use appenders::{ConsoleAppender, FileAppender};
pub use config::{AdapterConfig, AppenderConfig};
pub use core::{
    Appender, ControlParams, FieldValue, Fields, LogLevel, LogRecord, Logger, LoggerBuilder,
    LoggerError, LoggerMetrics, Message, OutputFormat, Result, CONTROL_PARAMS, INTRINSIC_FIELDS,
};
pub use formatters::{is_output_field, Formatter, JsonFormatter, StringFormatter, META_KEYS};
