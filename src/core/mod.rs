//! Core logger types and traits

pub mod appender;
pub mod control;
pub mod error;
pub mod fields;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod output_format;
pub mod registry;

pub use appender::Appender;
pub use control::{is_control_param, ControlParams, CONTROL_PARAMS};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use log_level::LogLevel;
pub use log_record::{is_reserved_key, LogRecord, INTRINSIC_FIELDS};
pub use logger::{Logger, LoggerBuilder};
pub use message::Message;
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
