//! Reserved keyword arguments that steer the logger instead of becoming fields

use super::error::{LoggerError, Result};
use super::fields::{FieldValue, Fields};
use std::fmt::Write;

/// The closed set of keyword names passed through to the logger call.
pub const CONTROL_PARAMS: [&str; 3] = ["exc_info", "stack_info", "stacklevel"];

#[inline]
pub fn is_control_param(key: &str) -> bool {
    CONTROL_PARAMS.contains(&key)
}

/// Control parameters split out of a call's keyword arguments, in caller order.
///
/// Values are carried unchanged; the logger interprets them when it builds the
/// record and rejects values it cannot use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlParams {
    params: Fields,
}

impl ControlParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.params.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.params.get(key)
    }

    pub fn as_fields(&self) -> &Fields {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Error description to attach to the record.
    ///
    /// Accepts a string or `Display` value; `false` and null mean "none".
    pub fn exc_info(&self) -> Result<Option<String>> {
        match self.get("exc_info") {
            None | Some(FieldValue::Null) | Some(FieldValue::Bool(false)) => Ok(None),
            Some(FieldValue::String(s)) => Ok(Some(s.clone())),
            Some(FieldValue::Display(d)) => {
                let mut rendered = String::new();
                write!(rendered, "{}", d).map_err(|_| {
                    LoggerError::control_parameter("exc_info", "value could not be rendered")
                })?;
                Ok(Some(rendered))
            }
            Some(FieldValue::Bool(true)) => Err(LoggerError::control_parameter(
                "exc_info",
                "expected an error value, not `true`",
            )),
            Some(other) => Err(LoggerError::control_parameter(
                "exc_info",
                format!("expected a string or error value, got {}", other.kind()),
            )),
        }
    }

    /// Whether a backtrace should be captured for the record
    pub fn stack_info(&self) -> Result<bool> {
        match self.get("stack_info") {
            None => Ok(false),
            Some(value) if value.is_null() => Ok(false),
            Some(value) => value.as_bool().ok_or_else(|| {
                LoggerError::control_parameter(
                    "stack_info",
                    format!("expected a bool, got {}", value.kind()),
                )
            }),
        }
    }

    /// Stack level hint, 1 when absent
    pub fn stacklevel(&self) -> Result<u32> {
        let Some(value) = self.get("stacklevel") else {
            return Ok(1);
        };
        value
            .as_i64()
            .and_then(|level| u32::try_from(level).ok())
            .filter(|level| *level >= 1)
            .ok_or_else(|| {
                LoggerError::control_parameter(
                    "stacklevel",
                    format!("expected a positive integer, got {}", value),
                )
            })
    }
}
