//! Worker pool example
//!
//! Demonstrates asynchronous delivery from several producer threads, scoped
//! subscriptions, contained subscriber failures and metrics.
//!
//! Run with: cargo run --example worker_pool

use callback_logger::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Callback Logger - Worker Pool Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .worker_count(4)
            .thread_name("demo-log")
            .on_delivery_failure(Arc::new(|err| println!("   delivery failed: {}", err)))
            .build()?,
    );

    let received = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&received);
    logger.register_function_callback(
        move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        },
        Severity::Debug,
    )?;

    println!("1. Four producers, 500 entries each:");
    let producers: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let component = ComponentId::named("Producer", t);
                for i in 0..500 {
                    let _ = logger.log(
                        Severity::Info,
                        component.clone(),
                        format!("item {}", i),
                        file!(),
                        line!(),
                    );
                }
            })
        })
        .collect();
    for producer in producers {
        let _ = producer.join();
    }
    logger.wait_idle(Duration::from_secs(5));
    println!("   received {}", received.load(Ordering::Relaxed));

    println!("\n2. A panicking subscriber is contained:");
    {
        let _guard = logger.subscribe_function(|_| panic!("subscriber bug"), Severity::Error)?;
        logger.log(
            Severity::Error,
            ComponentId::named("Producer", 0),
            "bad things",
            file!(),
            line!(),
        )?;
        logger.wait_idle(Duration::from_secs(5));
    }

    println!("\n3. Metrics:");
    let metrics = logger.metrics();
    println!("   entries logged:        {}", metrics.entries_logged());
    println!("   deliveries completed:  {}", metrics.deliveries_completed());
    println!("   deliveries failed:     {}", metrics.deliveries_failed());
    println!("   failure rate:          {:.2}%", metrics.failure_rate());

    logger.shutdown();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
