//! File logging example
//!
//! Demonstrates text and JSON writers backed by files.
//!
//! Run with: cargo run --example file_logging

use scopelog::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== scopelog - File Logging Example ===\n");

    let text = Arc::new(TextWriter::file("application.log")?);
    let logger = Logger::builder().writer(text.clone()).build();

    println!("1. Logging to 'application.log':");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger
        .with("path", "/etc/app/config.toml")
        .info("Configuration loaded successfully");

    for i in 1..=5 {
        logger.with("item", i).info(format!("Processing item {}/5", i));
    }
    logger.flush()?;

    println!("\n2. Switching to JSON lines in 'application.jsonl':");
    let json = Arc::new(JsonWriter::file("application.jsonl")?);
    logger.set_writer(json.clone());
    logger
        .with_fields([("host", "web-1"), ("region", "eu-west-1")])
        .info("Database connection established");
    let _ = logger.with("plugin", "metrics").error("Failed to load optional plugin");
    logger.flush()?;

    println!(
        "   text records: {}, json records: {}",
        text.metrics().records_written(),
        json.metrics().records_written()
    );

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'application.jsonl' for the output");

    Ok(())
}
