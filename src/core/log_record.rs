//! Log record structure
//!
//! A record carries a fixed set of intrinsic attributes plus the extra fields
//! merged by the adapter. Attributes are exposed by name, in a stable native
//! order: the intrinsic ones in [`INTRINSIC_FIELDS`] order, then the extras in
//! their own insertion order.

use super::error::{LoggerError, Result};
use super::fields::{FieldValue, Fields};
use super::log_level::LogLevel;
use super::message::{self, Message};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::cell::RefCell;
use std::path::Path;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Names of every attribute a record has before any extra field is attached,
/// in native iteration order.
pub const INTRINSIC_FIELDS: [&str; 17] = [
    "msg",
    "args",
    "filename",
    "pathname",
    "module",
    "levelname",
    "levelno",
    "name",
    "lineno",
    "created",
    "msecs",
    "relative_created",
    "thread",
    "thread_name",
    "process",
    "exc_info",
    "stack_info",
];

/// Names no extra field may take: the intrinsic attributes plus the key the
/// resolved message is published under.
pub fn is_reserved_key(key: &str) -> bool {
    key == "message" || INTRINSIC_FIELDS.contains(&key)
}

static START: OnceLock<Instant> = OnceLock::new();

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Name of the logger that produced the record
    pub name: String,
    pub level: LogLevel,
    /// Message template, before argument substitution
    pub msg: String,
    pub args: Vec<FieldValue>,
    pub pathname: Option<String>,
    pub lineno: Option<u32>,
    pub module: Option<String>,
    pub created: DateTime<Utc>,
    /// Time since the first record of this process was created
    pub relative_created: Duration,
    pub thread_id: String,
    pub thread_name: Option<String>,
    pub process: u32,
    /// Rendered error chain, when the call carried `exc_info`
    pub exc_info: Option<String>,
    /// Captured backtrace, when the call carried `stack_info`
    pub stack_info: Option<String>,
    extra: Fields,
}

impl LogRecord {
    /// Create a bare record: intrinsic attributes only, no extra fields
    pub fn new(name: impl Into<String>, level: LogLevel, message: impl Into<Message>) -> Self {
        let start = START.get_or_init(Instant::now);
        let (msg, args) = message.into().into_parts();
        Self {
            name: name.into(),
            level,
            msg,
            args,
            pathname: None,
            lineno: None,
            module: None,
            created: Utc::now(),
            relative_created: start.elapsed(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            process: std::process::id(),
            exc_info: None,
            stack_info: None,
            extra: Fields::new(),
        }
    }

    /// Set the source location; the module is the file stem
    pub fn with_location(mut self, file: &str, line: u32) -> Self {
        self.module = Path::new(file)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        self.pathname = Some(file.to_string());
        self.lineno = Some(line);
        self
    }

    /// Attach extra fields.
    ///
    /// Fails with [`LoggerError::ReservedField`] if any key would shadow an
    /// intrinsic attribute.
    pub fn with_extra(mut self, extra: Fields) -> Result<Self> {
        if let Some(key) = extra.keys().find(|key| is_reserved_key(key)) {
            return Err(LoggerError::reserved_field(key));
        }
        self.extra = extra;
        Ok(self)
    }

    pub fn with_exc_info(mut self, exc_info: impl Into<String>) -> Self {
        self.exc_info = Some(exc_info.into());
        self
    }

    pub fn with_stack_info(mut self, stack_info: impl Into<String>) -> Self {
        self.stack_info = Some(stack_info.into());
        self
    }

    pub fn extra(&self) -> &Fields {
        &self.extra
    }

    /// Final file name component of `pathname`
    pub fn filename(&self) -> Option<Cow<'_, str>> {
        let pathname = self.pathname.as_deref()?;
        Some(
            Path::new(pathname)
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or(Cow::Borrowed(pathname)),
        )
    }

    /// The message with its arguments substituted.
    ///
    /// Resolution happens into a fresh value on every call; the stored template
    /// and arguments are never modified, so a record can be formatted any number
    /// of times, from any number of threads. Line breaks are kept; escaping them
    /// is up to the formatter.
    pub fn message(&self) -> Result<Cow<'_, str>> {
        message::resolve(&self.msg, &self.args)
    }

    /// Attribute names in native order: intrinsic attributes, then extras
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        let intrinsic: &[&str] = &INTRINSIC_FIELDS;
        intrinsic.iter().copied().chain(self.extra.keys())
    }

    /// Look up any attribute, intrinsic or extra, by name
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, FieldValue>> {
        let value: FieldValue = match key {
            "msg" => FieldValue::from(self.msg.as_str()),
            "args" => FieldValue::Json(serde_json::Value::Array(
                self.args
                    .iter()
                    .map(|arg| serde_json::Value::String(arg.to_string()))
                    .collect(),
            )),
            "filename" => self.filename().map(Cow::into_owned).into(),
            "pathname" => self.pathname.as_deref().into(),
            "module" => self.module.as_deref().into(),
            "levelname" => self.level.to_str().into(),
            "levelno" => FieldValue::UInt(self.level.as_number().into()),
            "name" => self.name.as_str().into(),
            "lineno" => self.lineno.into(),
            "created" => FieldValue::Float(self.created.timestamp_micros() as f64 / 1_000_000.0),
            "msecs" => {
                FieldValue::Float(f64::from(self.created.timestamp_subsec_micros()) / 1000.0)
            }
            "relative_created" => FieldValue::Float(self.relative_created.as_secs_f64() * 1000.0),
            "thread" => self.thread_id.as_str().into(),
            "thread_name" => self.thread_name.as_deref().into(),
            "process" => self.process.into(),
            "exc_info" => self.exc_info.as_deref().into(),
            "stack_info" => self.stack_info.as_deref().into(),
            _ => return self.extra.get(key).map(Cow::Borrowed),
        };
        Some(Cow::Owned(value))
    }
}
