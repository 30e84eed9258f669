//! Dispatch engine
//!
//! For one accepted entry: snapshot the registry, keep the subscriptions
//! whose filter matches, and submit one delivery per match. File deliveries
//! are submitted before function deliveries; once they reach the worker pool
//! nothing orders their completion.

use super::error::Result;
use super::executor::{Delivery, Executor};
use super::log_entry::LogEntry;
use super::metrics::LoggerMetrics;
use super::registry::{Snapshot, SubscriptionRegistry};
use std::sync::Arc;

/// Deliveries for `entry` out of `snapshot`, in submission order
pub fn plan(snapshot: Snapshot, entry: &Arc<LogEntry>) -> Vec<Delivery> {
    let severity = entry.severity;
    let component = &entry.component;

    let files = snapshot
        .files
        .into_iter()
        .filter(|s| s.filter().matches(severity, component))
        .map(|subscription| Delivery::File {
            subscription,
            entry: Arc::clone(entry),
        });

    let functions = snapshot
        .functions
        .into_iter()
        .filter(|s| s.filter().matches(severity, component))
        .map(|subscription| Delivery::Function {
            subscription,
            entry: Arc::clone(entry),
        });

    files.chain(functions).collect()
}

pub struct Dispatcher {
    registry: Arc<SubscriptionRegistry>,
    executor: Box<dyn Executor>,
    metrics: Arc<LoggerMetrics>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        executor: Box<dyn Executor>,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            registry,
            executor,
            metrics,
        }
    }

    pub fn executor(&self) -> &dyn Executor {
        self.executor.as_ref()
    }

    /// Fan `entry` out to every matching subscription. Returns how many
    /// deliveries were submitted.
    pub fn dispatch(&self, entry: LogEntry) -> Result<usize> {
        let entry = Arc::new(entry);
        let deliveries = plan(self.registry.snapshot(), &entry);
        let count = deliveries.len();
        if count == 0 {
            return Ok(0);
        }

        self.metrics.record_scheduled(count as u64);
        if let Err(e) = self.executor.execute(deliveries) {
            self.metrics.record_unscheduled(count as u64);
            return Err(e);
        }
        Ok(count)
    }
}
