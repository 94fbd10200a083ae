//! Log message templates with positional arguments

use super::error::{LoggerError, Result};
use super::fields::FieldValue;
use std::borrow::Cow;
use std::fmt::Write;

/// A message template plus the positional arguments substituted into it.
///
/// Each `{}` in the template takes the next argument; `{{` and `}}` are literal
/// braces. Without arguments the template is used as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    template: String,
    args: Vec<FieldValue>,
}

impl Message {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            args: Vec::new(),
        }
    }

    /// Append a positional argument
    #[must_use]
    pub fn arg(mut self, value: impl Into<FieldValue>) -> Self {
        self.args.push(value.into());
        self
    }

    #[must_use]
    pub fn with_args<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn args(&self) -> &[FieldValue] {
        &self.args
    }

    pub(crate) fn into_parts(self) -> (String, Vec<FieldValue>) {
        (self.template, self.args)
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::new(s)
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::new(s)
    }
}

impl From<&String> for Message {
    fn from(s: &String) -> Self {
        Message::new(s.clone())
    }
}

/// Substitute `args` into `template`.
///
/// Fails when the number of placeholders and arguments differ, or when an
/// argument's `Display` impl reports an error.
pub(crate) fn resolve<'a>(template: &'a str, args: &[FieldValue]) -> Result<Cow<'a, str>> {
    if args.is_empty() {
        return Ok(Cow::Borrowed(template));
    }

    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                let arg = remaining.next().ok_or_else(|| {
                    LoggerError::formatter("message", "not enough arguments for format string")
                })?;
                write!(out, "{}", arg).map_err(|_| {
                    LoggerError::formatter("message", "argument could not be converted to a string")
                })?;
            }
            other => out.push(other),
        }
    }

    if remaining.next().is_some() {
        return Err(LoggerError::formatter(
            "message",
            "not all arguments converted during string formatting",
        ));
    }

    Ok(Cow::Owned(out))
}
