//! Request scope example
//!
//! Demonstrates enrichers, request contexts and the process-wide logger.
//!
//! Run with: cargo run --example request_scope

use scopelog::prelude::*;
use std::sync::Arc;
use std::thread;

fn handle_request(id: usize) -> std::result::Result<(), ScopeError> {
    let ctx = Context::background()
        .with_value("request_id", format!("req-{}", id))
        .with_tracing(TracingContext::new("trace-7f3a", format!("span-{}", id)));

    let scope = scopelog::with_context(ctx).with("route", "/orders");
    scope.info("request received");

    if id % 2 == 0 {
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "inventory service timed out");
        return Err(scope.with_error(&cause).error("reserving stock"));
    }

    scope.with("items", vec!["book", "pen"]).info("order placed");
    Ok(())
}

fn main() -> Result<()> {
    println!("=== scopelog - Request Scope Example ===\n");

    scopelog::set_writer(Arc::new(JsonWriter::stdout()));
    scopelog::set_level_name("debug");
    scopelog::register_enricher(StaticFieldsEnricher::new().with_field("service", "orders"));
    scopelog::register_enricher(TracingEnricher);
    scopelog::register_enricher(ContextValuesEnricher);

    let handles: Vec<_> = (1..=4).map(|id| thread::spawn(move || handle_request(id))).collect();

    for handle in handles {
        if let Ok(Err(err)) = handle.join() {
            scopelog::debug(format!("request failed: {}", err));
        }
    }

    scopelog::flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
