//! Human-readable formatter

use super::{output_fields, write_value, Formatter};
use crate::core::{FieldValue, LogRecord, Result};
use std::borrow::Cow;

/// Renders `<message>: <field>=<value>  <field>=<value> ...`.
///
/// Fields are separated by two spaces. A record with no output fields still
/// gets the `": "` separator, so the line ends in a trailing space. Line breaks
/// and tabs in the message, keys and values are written as `\n`, `\r` and
/// `\t`, so every record is exactly one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFormatter;

impl StringFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for StringFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let message = record.message()?;
        render_line(&message, output_fields(record))
    }
}

/// Escape line breaks and tabs so a single record stays on a single line
fn escape_line_breaks(text: &str) -> Cow<'_, str> {
    if !text.contains(&['\n', '\r', '\t'][..]) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t"),
    )
}

fn render_line<'a>(
    message: &str,
    fields: impl IntoIterator<Item = (&'a str, Cow<'a, FieldValue>)>,
) -> Result<String> {
    let mut out = String::with_capacity(message.len() + 64);
    out.push_str(&escape_line_breaks(message));
    out.push_str(": ");

    let mut value_buf = String::new();
    for (idx, (key, value)) in fields.into_iter().enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        out.push_str(&escape_line_breaks(key));
        out.push('=');
        value_buf.clear();
        write_value(&mut value_buf, key, &value, "string")?;
        out.push_str(&escape_line_breaks(&value_buf));
    }

    Ok(out)
}
