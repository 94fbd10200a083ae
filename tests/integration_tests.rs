//! Integration tests for the extra adapter

use extra_adapter::prelude::*;
use extra_adapter::{info, warning};
use parking_lot::Mutex;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

#[derive(Clone, Default)]
struct MemoryAppender {
    lines: Arc<Mutex<Vec<String>>>,
    format: OutputFormat,
}

impl MemoryAppender {
    fn new(format: OutputFormat) -> Self {
        Self {
            lines: Arc::default(),
            format,
        }
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.format.format(record)?;
        self.lines.lock().push(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn parse_object(line: &str) -> serde_json::Map<String, serde_json::Value> {
    match serde_json::from_str(line).unwrap() {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

#[test]
fn test_threads_write_json_lines_to_file() -> Result<()> {
    let dir = tempdir()?;
    let log_path = dir.path().join("threads.jsonl");

    let adapter = get_logger(
        "integration.threads",
        LogLevel::Info,
        None,
        vec![Box::new(
            FileAppender::new(&log_path)?.with_output_format(OutputFormat::Json),
        )],
    );

    let handles = vec![
        {
            let adapter = adapter.clone();
            thread::spawn(move || {
                adapter.info("thread1", fields! { value = "one", additional = "second" })
            })
        },
        {
            let adapter = adapter.clone();
            thread::spawn(move || adapter.warning("thread2", fields! { value = "two" }))
        },
        {
            let adapter = adapter.clone();
            thread::spawn(move || adapter.debug("thread3", Fields::new()))
        },
    ];
    for handle in handles {
        handle.join().unwrap()?;
    }
    adapter.flush()?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2, "debug record must be filtered: {:?}", lines);

    let mut records: Vec<_> = lines.iter().map(|line| parse_object(line)).collect();
    records.sort_by(|a, b| a["message"].as_str().cmp(&b["message"].as_str()));

    let first = &records[0];
    assert_eq!(first["message"], "thread1");
    assert_eq!(first["value"], "one");
    assert_eq!(first["additional"], "second");
    assert_eq!(first["levelname"], "INFO");
    assert_eq!(first["name"], "integration.threads");
    assert_eq!(first["filename"], "integration_tests.rs");

    let second = &records[1];
    assert_eq!(second["message"], "thread2");
    assert_eq!(second["value"], "two");
    assert_eq!(second["levelname"], "WARNING");
    assert!(!second.contains_key("additional"));
    Ok(())
}

#[test]
fn test_string_scenario() -> Result<()> {
    let memory = MemoryAppender::new(OutputFormat::Text);
    let adapter = ExtraAdapter::builder("integration.string")
        .appender(memory.clone())
        .build();

    let line = line!() + 1;
    adapter.info("this is a message", Fields::new())?;

    assert_eq!(
        memory.lines(),
        vec![format!(
            "this is a message: filename=integration_tests.rs  levelname=INFO  name=integration.string  lineno={}",
            line
        )]
    );
    Ok(())
}

#[test]
fn test_default_and_call_fields_in_output() -> Result<()> {
    let memory = MemoryAppender::new(OutputFormat::Text);
    let adapter = ExtraAdapter::builder("integration.defaults")
        .default_field("service", "api")
        .default_field("env", "dev")
        .appender(memory.clone())
        .build();

    info!(adapter, "deploy"; env = "prod", version = "1.4.0")?;

    let lines = memory.lines();
    assert!(
        lines[0].ends_with("service=api  env=prod  version=1.4.0"),
        "{}",
        lines[0]
    );
    assert_eq!(adapter.default_extra().get("env"), Some(&FieldValue::from("dev")));
    Ok(())
}

#[test]
fn test_registry_shares_appenders_and_level() -> Result<()> {
    let memory = MemoryAppender::new(OutputFormat::Text);
    let writer = ExtraAdapter::builder("integration.shared")
        .level(LogLevel::Warning)
        .appender(memory.clone())
        .build();

    // Same logger, different default fields
    let other = ExtraAdapter::new(writer.logger().clone(), fields! { component = "worker" });

    info!(other, "ignored")?;
    warning!(other, "kept")?;
    warning!(writer, "also kept")?;

    let lines = memory.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("component=worker"));
    assert!(lines[1].starts_with("also kept: "));
    assert!(!lines[1].contains("component="));
    Ok(())
}

#[test]
fn test_reserved_key_reaches_caller() {
    let memory = MemoryAppender::new(OutputFormat::Json);
    let adapter = ExtraAdapter::builder("integration.reserved")
        .appender(memory.clone())
        .build();

    let err = adapter
        .info("shadow", fields! { levelname = "fake" })
        .unwrap_err();

    assert_eq!(err.to_string(), "Attempt to overwrite 'levelname' in log record");
    assert!(memory.lines().is_empty());
    assert_eq!(adapter.logger().metrics().rejected_count(), 1);
}

#[test]
fn test_reserved_default_key_reaches_caller() {
    let adapter = ExtraAdapter::builder("integration.reserved-default")
        .default_field("message", "fixed")
        .appender(MemoryAppender::new(OutputFormat::Text))
        .build();

    assert!(matches!(
        adapter.info("x", Fields::new()),
        Err(LoggerError::ReservedField { ref key }) if key == "message"
    ));
}

#[test]
fn test_concurrent_calls_do_not_interfere() {
    const THREADS: usize = 8;
    const CALLS: usize = 50;

    let memory = MemoryAppender::new(OutputFormat::Json);
    let adapter = ExtraAdapter::builder("integration.concurrent")
        .default_field("service", "fanout")
        .appender(memory.clone())
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let adapter = adapter.clone();
            thread::spawn(move || {
                for i in 0..CALLS {
                    adapter
                        .info(
                            format!("t{}-{}", t, i),
                            fields! { worker = t, seq = i, tag = format!("tag-{}-{}", t, i) },
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = memory.lines();
    assert_eq!(lines.len(), THREADS * CALLS);
    for line in &lines {
        let record = parse_object(line);
        let message = record["message"].as_str().unwrap();
        let worker = record["worker"].as_str().unwrap();
        let seq = record["seq"].as_str().unwrap();
        assert_eq!(message, format!("t{}-{}", worker, seq));
        assert_eq!(record["tag"], format!("tag-{}-{}", worker, seq));
        assert_eq!(record["service"], "fanout");
    }
    assert!(adapter.default_extra().get("worker").is_none());
}

#[test]
fn test_exception_is_not_rendered() -> Result<()> {
    let memory = MemoryAppender::new(OutputFormat::Json);
    let adapter = ExtraAdapter::builder("integration.exception")
        .appender(memory.clone())
        .build();

    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    adapter.exception("startup failed", &err, fields! { attempt = 1 })?;

    let record = parse_object(&memory.lines()[0]);
    assert_eq!(record["levelname"], "ERROR");
    assert_eq!(record["attempt"], "1");
    assert!(!record.contains_key("exc_info"));
    Ok(())
}

#[test]
fn test_config_round_trip_to_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("configured.log");
    let json = serde_json::json!({
        "name": "integration.config",
        "level": "DEBUG",
        "default_extra": {"region": "eu-west-1"},
        "appenders": [{"type": "file", "path": path}]
    });

    let adapter = AdapterConfig::from_json(&json.to_string())?.build()?;
    adapter.debug("cache warmed", fields! { entries = 512 })?;

    let content = fs::read_to_string(&path)?;
    assert!(content.starts_with("cache warmed: filename=integration_tests.rs  levelname=DEBUG"));
    assert!(content.trim_end().ends_with("region=eu-west-1  entries=512"));
    Ok(())
}
