//! File logging example
//!
//! Builds an adapter from a JSON configuration that writes text to the console
//! and JSON lines to a file, then logs from several threads.
//!
//! Run with: cargo run --example file_logging

use extra_adapter::prelude::*;
use extra_adapter::{error, info};
use std::thread;

fn main() -> Result<()> {
    println!("=== Extra Adapter - File Logging Example ===\n");

    let config = AdapterConfig::from_json(
        r#"{
            "name": "demo.file",
            "level": "INFO",
            "default_extra": {"app": "ingest", "version": "2.3.1"},
            "appenders": [
                {"type": "console"},
                {"type": "file", "path": "application.jsonl", "format": "json"}
            ]
        }"#,
    )?;
    let log = config.build()?;

    println!("1. Logging to both console and file:");
    info!(log, "pipeline starting"; sources = 3)?;
    log.debug("not written, below INFO", Fields::new())?;

    println!("\n2. Logging from worker threads:");
    let workers: Vec<_> = (0..3)
        .map(|worker| {
            let log = log.clone();
            thread::spawn(move || -> Result<()> {
                for batch in 0..2 {
                    info!(log, "batch {} done", batch; worker = worker, rows = 1000 * (batch + 1))?;
                }
                Ok(())
            })
        })
        .collect();
    for handle in workers {
        handle
            .join()
            .map_err(|_| LoggerError::other("worker thread panicked"))??;
    }

    println!("\n3. A rejected call:");
    if let Err(e) = log.info("bad field", fields! { lineno = 7 }) {
        error!(log, "call rejected: {}", e)?;
    }

    log.flush()?;
    println!("\nJSON lines written to application.jsonl");
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
