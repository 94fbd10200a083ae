//! Basic adapter usage example
//!
//! Demonstrates default fields, per-call fields and the two output formats on
//! the console.
//!
//! Run with: cargo run --example basic_usage

use extra_adapter::prelude::*;
use extra_adapter::{debug, info, warning};

#[derive(Debug)]
struct QuotaExceeded {
    limit: u32,
}

impl std::fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "quota of {} requests exceeded", self.limit)
    }
}

impl std::error::Error for QuotaExceeded {}

fn main() -> Result<()> {
    println!("=== Extra Adapter - Basic Usage Example ===\n");

    let log = ExtraAdapter::builder("demo.basic")
        .level(LogLevel::Debug)
        .default_field("service", "checkout")
        .default_field("region", "eu-west-1")
        .appender(ConsoleAppender::with_colors(true))
        .build();

    println!("1. Default fields only:");
    log.info("service started", Fields::new())?;

    println!("\n2. Per-call fields (a call field overrides the default):");
    info!(log, "order placed"; order_id = "A-1009", total = 42.5, region = "us-east-1")?;
    debug!(log, "cart size {}", 3; user = "alice")?;

    println!("\n3. Control parameters never become fields:");
    log.warning("slow dependency", fields! { dependency = "payments", stack_info = false })?;

    println!("\n4. Errors and their causes go to exc_info:");
    log.exception("request rejected", &QuotaExceeded { limit: 100 }, fields! { user = "bob" })?;

    println!("\n5. A second logger with JSON output:");
    let json = ExtraAdapter::builder("demo.basic.json")
        .default_extra(fields! { service = "checkout", worker = 2 })
        .appender(ConsoleAppender::new().with_output_format(OutputFormat::Json))
        .build();
    warning!(json, "retrying"; attempt = 2, backoff_ms = 250)?;

    println!("\n6. Filtered levels are skipped:");
    log.logger().set_min_level(LogLevel::Warning);
    info!(log, "not shown")?;
    println!("   filtered so far: {}", log.logger().metrics().filtered_count());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
