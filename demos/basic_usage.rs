//! Basic logger usage example
//!
//! Demonstrates synchronous delivery to function callbacks with the three
//! filter shapes.
//!
//! Run with: cargo run --example basic_usage

use callback_logger::prelude::*;
use callback_logger::{impl_component, info, warning};

#[derive(Debug, Clone, Copy)]
enum Subsystem {
    Network,
    Storage,
    Ui,
}
impl_component!(Subsystem);

fn main() -> Result<()> {
    println!("=== Callback Logger - Basic Usage Example ===\n");

    // Deliver on the calling thread
    let logger = Logger::single_threaded();

    // Everything at Warning or above
    logger.register_function_callback(
        |entry| println!("   [alerts]  {} {}: {}", entry.severity, entry.component, entry.message),
        Severity::Warning,
    )?;

    // Every severity, but only from storage
    logger.register_function_callback(
        |entry| println!("   [storage] {} {}: {}", entry.severity, entry.component, entry.message),
        Filter::component(Subsystem::Storage),
    )?;

    // Per-component thresholds
    let handle = logger.register_function_callback(
        |entry| println!("   [mixed]   {} {}: {}", entry.severity, entry.component, entry.message),
        Filter::from_map([
            (Subsystem::Network, Severity::Info),
            (Subsystem::Ui, Severity::Error),
        ]),
    )?;

    println!("1. Logging from different subsystems:");
    info!(logger, Subsystem::Network, "Listening on port {}", 8080)?;
    info!(logger, Subsystem::Ui, "Window opened")?;
    logger.log(Severity::Debug, Subsystem::Storage, "Cache warmed", file!(), line!())?;
    warning!(logger, Subsystem::Storage, "Disk {}% full", 91)?;

    println!("\n2. After unregistering the mixed subscriber:");
    logger.unregister_function_callback(handle)?;
    info!(logger, Subsystem::Network, "Peer connected")?;
    warning!(logger, Subsystem::Network, "Peer latency high")?;

    println!("\n3. Invalid entries are rejected:");
    if let Err(e) = logger.log(Severity::Info, Subsystem::Ui, "", file!(), line!()) {
        println!("   {}", e);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
