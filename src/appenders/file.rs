//! File appender implementation

use crate::core::{Appender, LogRecord, LoggerError, OutputFormat, Result};
use crate::formatters::Formatter;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one formatted line per record to a file.
///
/// By default the buffer is flushed after every record, so the file always
/// holds complete lines.
pub struct FileAppender {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    formatter: Box<dyn Formatter>,
    auto_flush: bool,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            formatter: OutputFormat::default().formatter(),
            auto_flush: true,
        })
    }

    /// Set the output format for this appender
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extra_adapter::appenders::FileAppender;
    /// use extra_adapter::OutputFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.jsonl")
    ///     .unwrap()
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

    /// Flush after every record (default) or only on explicit `flush`
    #[must_use]
    pub fn with_auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        // Format before touching the writer so a failed render writes nothing
        let mut output = self.formatter.format(record)?;
        output.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writer.write_all(output.as_bytes())?;
        if self.auto_flush {
            writer.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
