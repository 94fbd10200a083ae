//! Output format selection for appenders
//!
//! - Text: `<message>: field=value  field=value` (default)
//! - Json: `{"message": "...", "field": "value", ...}`

use super::error::Result;
use super::log_record::LogRecord;
use crate::formatters::{Formatter, JsonFormatter, StringFormatter};
use serde::{Deserialize, Serialize};

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `Request processed: filename=api.rs  levelname=INFO  name=api  lineno=42  user_id=7`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"message":"Request processed","filename":"api.rs","levelname":"INFO","name":"api","lineno":"42","user_id":"7"}`
    Json,
}

impl OutputFormat {
    /// Boxed formatter for this format
    pub fn formatter(self) -> Box<dyn Formatter> {
        match self {
            OutputFormat::Text => Box::new(StringFormatter),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}

impl Formatter for OutputFormat {
    fn format(&self, record: &LogRecord) -> Result<String> {
        match self {
            OutputFormat::Text => StringFormatter.format(record),
            OutputFormat::Json => JsonFormatter.format(record),
        }
    }
}
