//! Appender trait for log output destinations

use super::{error::Result, log_record::LogRecord};

/// A sink that receives every record its logger lets through.
///
/// Appenders render records with the [`Formatter`](crate::formatters::Formatter)
/// they own, once per delivered record.
pub trait Appender: Send + Sync {
    fn append(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
