//! Criterion benchmarks for callback_logger

use callback_logger::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn component(value: u32) -> ComponentId {
    ComponentId::named("Bench", value)
}

fn counting_callback(counter: &Arc<AtomicU64>) -> impl Fn(&LogEntry) + Send + Sync + 'static {
    let counter = Arc::clone(counter);
    move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("single_threaded", |b| {
        b.iter(|| black_box(Logger::single_threaded()));
    });

    group.bench_function("worker_pool_4", |b| {
        b.iter(|| black_box(Logger::new(4).unwrap()));
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_sync_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_dispatch");
    group.throughput(Throughput::Elements(1));

    let counter = Arc::new(AtomicU64::new(0));
    let logger = Logger::single_threaded();

    group.bench_function("no_subscribers", |b| {
        b.iter(|| {
            logger
                .log(Severity::Info, component(0), black_box("message"), "bench.rs", 1)
                .unwrap()
        });
    });

    for _ in 0..8 {
        logger
            .register_function_callback(counting_callback(&counter), Severity::Debug)
            .unwrap();
    }

    group.bench_function("eight_subscribers", |b| {
        b.iter(|| {
            logger
                .log(Severity::Info, component(0), black_box("message"), "bench.rs", 1)
                .unwrap()
        });
    });

    group.finish();
}

fn bench_pool_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_dispatch");
    group.throughput(Throughput::Elements(1));

    let counter = Arc::new(AtomicU64::new(0));
    let logger = Logger::new(4).unwrap();
    logger
        .register_function_callback(counting_callback(&counter), Filter::all())
        .unwrap();

    group.bench_function("enqueue", |b| {
        b.iter(|| {
            logger
                .log(Severity::Info, component(0), black_box("message"), "bench.rs", 1)
                .unwrap()
        });
    });
    logger.wait_idle(Duration::from_secs(30));

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            let counter = Arc::new(AtomicU64::new(0));
            let logger = Arc::new(Logger::new(4).unwrap());
            logger
                .register_function_callback(counting_callback(&counter), Filter::all())
                .unwrap();

            b.iter(|| {
                let producers: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..100 {
                                let _ = logger.log(Severity::Info, component(0), "m", "bench.rs", i + 1);
                            }
                        })
                    })
                    .collect();
                for producer in producers {
                    let _ = producer.join();
                }
            });
            logger.shutdown();
        });
    }

    group.finish();
}

// ============================================================================
// Filter Benchmarks
// ============================================================================

fn bench_filter_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_matching");
    group.throughput(Throughput::Elements(1));

    let min = Filter::min_severity(Severity::Warning);
    let map = Filter::from_map((0..32).map(|v| (component(v), Severity::Info)));
    let hit = component(17);
    let miss = component(99);

    group.bench_function("min_severity", |b| {
        b.iter(|| black_box(min.matches(black_box(Severity::Error), &hit)));
    });
    group.bench_function("component_map_hit", |b| {
        b.iter(|| black_box(map.matches(black_box(Severity::Error), &hit)));
    });
    group.bench_function("component_map_miss", |b| {
        b.iter(|| black_box(map.matches(black_box(Severity::Error), &miss)));
    });

    group.finish();
}

// ============================================================================
// Entry Benchmarks
// ============================================================================

fn bench_entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_entry");
    group.throughput(Throughput::Elements(1));

    group.bench_function("create", |b| {
        b.iter(|| {
            black_box(
                LogEntry::new(
                    Severity::Info,
                    component(1),
                    "message".to_string(),
                    "bench.rs".to_string(),
                    1,
                )
                .unwrap(),
            )
        });
    });

    let entry = LogEntry::new(
        Severity::Warning,
        component(1),
        "message with \"quotes\"".to_string(),
        "bench.rs".to_string(),
        42,
    )
    .unwrap();

    group.bench_function("format_line", |b| {
        b.iter(|| black_box(FileAppender::format_line(black_box(&entry))));
    });
    group.bench_function("to_json", |b| {
        b.iter(|| black_box(entry.to_json().unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_sync_dispatch,
    bench_pool_dispatch,
    bench_concurrent_logging,
    bench_filter_matching,
    bench_entry,
);

criterion_main!(benches);
