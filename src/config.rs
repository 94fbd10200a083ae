//! Declarative adapter configuration
//!
//! ```
//! use extra_adapter::config::AdapterConfig;
//! use extra_adapter::LogLevel;
//!
//! let config = AdapterConfig::from_json(
//!     r#"{
//!         "name": "config.doc",
//!         "level": "WARNING",
//!         "default_extra": {"service": "billing"},
//!         "appenders": [{"type": "console", "format": "json"}]
//!     }"#,
//! )?;
//! assert_eq!(config.level, LogLevel::Warning);
//!
//! let adapter = config.build()?;
//! assert!(!adapter.is_enabled_for(LogLevel::Info));
//! # Ok::<(), extra_adapter::LoggerError>(())
//! ```

use crate::adapter::ExtraAdapter;
use crate::appenders::{ConsoleAppender, FileAppender};
use crate::core::{Appender, Fields, LogLevel, LoggerError, OutputFormat, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Everything needed to build an [`ExtraAdapter`]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    pub name: String,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub default_extra: Fields,
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
}

/// One output destination
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum AppenderConfig {
    Console {
        #[serde(default)]
        format: OutputFormat,
        #[serde(default)]
        colors: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        format: OutputFormat,
    },
}

impl AppenderConfig {
    /// Open the appender this entry describes
    pub fn build(&self) -> Result<Box<dyn Appender>> {
        match self {
            AppenderConfig::Console { format, colors } => Ok(Box::new(
                ConsoleAppender::with_colors(*colors).with_output_format(*format),
            )),
            AppenderConfig::File { path, format } => {
                if path.as_os_str().is_empty() {
                    return Err(LoggerError::config("file appender", "path must not be empty"));
                }
                Ok(Box::new(FileAppender::new(path)?.with_output_format(*format)))
            }
        }
    }
}

impl AdapterConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::default(),
            default_extra: Fields::new(),
            appenders: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("adapter", "name must not be empty"));
        }
        Ok(())
    }

    /// Open every appender, then register them on the named logger.
    ///
    /// Nothing is registered if any appender fails to open.
    pub fn build(self) -> Result<ExtraAdapter> {
        self.validate()?;

        let appenders = self
            .appenders
            .iter()
            .map(AppenderConfig::build)
            .collect::<Result<Vec<_>>>()?;

        Ok(appenders
            .into_iter()
            .fold(ExtraAdapter::builder(self.name), |builder, appender| {
                builder.boxed_appender(appender)
            })
            .level(self.level)
            .default_extra(self.default_extra)
            .build())
    }
}
