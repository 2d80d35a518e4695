//! Basic logger usage example
//!
//! Demonstrates the text writer on stdout, scopes and level filtering.
//!
//! Run with: cargo run --example basic_usage

use scopelog::prelude::*;
use scopelog::{error, info};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== scopelog - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .writer(Arc::new(TextWriter::stdout().with_colors(true)))
        .min_level(LogLevel::Debug)
        .build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    let _ = logger.error("This is an error message");
    logger.flush()?;

    println!("\n2. Scopes carry fields into every record:");
    let scope = logger.with("user_id", 123).with("action", "login");
    info!(scope, "User {} logged in", 123);
    scope.fork().with("attempt", 2).info("Retried session refresh");
    logger.flush()?;

    println!("\n3. Errors returned from a scope:");
    let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "profile.json missing");
    let err = error!(logger.with_error(&cause), "loading profile for {}", "ana");
    logger.flush()?;
    println!("   returned: {}", err);

    println!("\n4. Minimum level set to INFO - debug won't show:");
    logger.set_min_level(LogLevel::Info);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (visible)");
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
