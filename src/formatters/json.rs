//! JSON formatter
//!
//! Emits one flat JSON object per record: `"message"` first, then every output
//! field in native order. Field values are always written as JSON strings, so
//! numbers and structured values lose their type on the way out.

use super::{output_fields, write_value, Formatter};
use crate::core::{LogRecord, LoggerError, Result};
use serde::ser::{SerializeMap, Serializer};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let message = record.message()?;

        let mut buf = Vec::with_capacity(128);
        let mut serializer = serde_json::Serializer::new(&mut buf);
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("message", &*message)?;

        let mut value_buf = String::new();
        for (key, value) in output_fields(record) {
            value_buf.clear();
            write_value(&mut value_buf, key, &value, "JSON")?;
            map.serialize_entry(key, &value_buf)?;
        }
        map.end()?;

        String::from_utf8(buf)
            .map_err(|e| LoggerError::formatter("JSON", format!("invalid UTF-8 output: {}", e)))
    }
}
