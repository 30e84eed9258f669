//! File logging example
//!
//! Demonstrates routing different components to different files.
//!
//! Run with: cargo run --example file_logging

use callback_logger::prelude::*;
use callback_logger::{error, info, warning};
use std::fs;

fn main() -> Result<()> {
    println!("=== Callback Logger - File Logging Example ===\n");

    let network = ComponentId::named("Network", 0);
    let storage = ComponentId::named("Storage", 0);

    let logger = Logger::single_threaded();
    logger.register_file_callback("application.log", Severity::Info)?;
    logger.register_file_callback(
        "storage_warnings.log",
        Filter::from_map([(storage.clone(), Severity::Warning)]),
    )?;

    println!("1. Logging to two files:");
    info!(logger, network.clone(), "Application started")?;
    info!(logger, storage.clone(), "Mounted /var/data")?;
    warning!(logger, storage.clone(), "Quota at {}%", 85)?;
    error!(logger, network, "Connection reset\nretrying")?;
    error!(logger, storage, "Write failed")?;

    logger.shutdown();

    for path in ["application.log", "storage_warnings.log"] {
        println!("\n2. Contents of {}:", path);
        let content = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading log file", path.to_string(), e)
        })?;
        for line in content.lines() {
            println!("   {}", line);
        }
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
