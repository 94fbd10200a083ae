//! Console appender implementation

use crate::core::{Appender, LogLevel, LogRecord, OutputFormat, Result};
use crate::formatters::Formatter;
#[cfg(feature = "console")]
use colored::Colorize;

/// Writes records to stdout, or to stderr for `Error` and `Critical`.
pub struct ConsoleAppender {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    formatter: Box<dyn Formatter>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: false,
            formatter: OutputFormat::default().formatter(),
        }
    }

    /// Color each line by level (requires the `console` feature)
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the output format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use extra_adapter::appenders::ConsoleAppender;
    /// use extra_adapter::OutputFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.formatter = format.formatter();
        self
    }

    /// Use a custom formatter
    #[must_use]
    pub fn with_formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    #[cfg(feature = "console")]
    fn paint(&self, line: String, level: LogLevel) -> String {
        if self.use_colors {
            line.color(level.color_code()).to_string()
        } else {
            line
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, line: String, _level: LogLevel) -> String {
        line
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.paint(self.formatter.format(record)?, record.level);

        // Route Error and Critical levels to stderr, others to stdout
        match record.level {
            LogLevel::Error | LogLevel::Critical => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_append() {
        let mut appender = ConsoleAppender::new().with_output_format(OutputFormat::Json);
        let record = LogRecord::new("console", LogLevel::Info, "to stdout");
        assert!(appender.append(&record).is_ok());
        assert!(appender.flush().is_ok());
        assert_eq!(appender.name(), "console");
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_colors_only_when_enabled() {
        colored::control::set_override(true);
        let plain = ConsoleAppender::new();
        let painted = ConsoleAppender::with_colors(true);

        assert_eq!(plain.paint("line".to_string(), LogLevel::Warning), "line");
        assert_ne!(painted.paint("line".to_string(), LogLevel::Warning), "line");
        colored::control::unset_override();
    }
}
