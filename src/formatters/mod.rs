//! Record formatters
//!
//! Both formatters show the same set of fields, decided by
//! [`is_output_field`]: every extra field, plus the intrinsic attributes in
//! [`META_KEYS`]. All other intrinsic attributes are suppressed.

pub mod json;
pub mod string;

pub use json::JsonFormatter;
pub use string::StringFormatter;

use crate::core::{FieldValue, LogRecord, LoggerError, Result, INTRINSIC_FIELDS};
use std::borrow::Cow;
use std::fmt::Write;

/// Intrinsic attributes that are always rendered
pub const META_KEYS: [&str; 4] = ["filename", "levelname", "name", "lineno"];

/// Renders one record into one output line.
///
/// Implementations must not hold per-record state: the same formatter is
/// shared by every record an appender receives.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<String>;
}

/// Whether a record attribute appears in formatted output.
///
/// True for anything outside the intrinsic attribute set (the extras) and for
/// the meta keys.
pub fn is_output_field(key: &str) -> bool {
    !INTRINSIC_FIELDS.contains(&key) || META_KEYS.contains(&key)
}

/// The record's output fields, in native attribute order
pub(crate) fn output_fields(
    record: &LogRecord,
) -> impl Iterator<Item = (&str, Cow<'_, FieldValue>)> {
    record
        .attribute_names()
        .filter(|key| is_output_field(key))
        .filter_map(move |key| record.attribute(key).map(|value| (key, value)))
}

/// Append `value`'s string form to `out`, failing if its `Display` impl does
pub(crate) fn write_value(
    out: &mut String,
    key: &str,
    value: &FieldValue,
    format_type: &str,
) -> Result<()> {
    write!(out, "{}", value).map_err(|_| {
        LoggerError::formatter(
            format_type,
            format!("field '{}' could not be converted to a string", key),
        )
    })
}
