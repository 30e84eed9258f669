//! Delivery error boundary and the diagnostic channel
//!
//! A failing subscriber (an `Err` from a file write or a panicking callback)
//! is contained here. It is counted, reported once, and never reaches the
//! caller of `log()`, the other deliveries, or the worker thread.

use super::error::LoggerError;
use super::metrics::LoggerMetrics;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Receives every contained delivery failure instead of stderr.
///
/// Runs on whichever thread performed the delivery.
pub type FailureCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Shared by the dispatcher and whichever executor runs the deliveries.
pub struct DeliveryBoundary {
    metrics: Arc<LoggerMetrics>,
    on_failure: Option<FailureCallback>,
}

impl DeliveryBoundary {
    pub fn new(metrics: Arc<LoggerMetrics>, on_failure: Option<FailureCallback>) -> Self {
        Self {
            metrics,
            on_failure,
        }
    }

    pub fn metrics(&self) -> &Arc<LoggerMetrics> {
        &self.metrics
    }

    /// Run `task`, converting an error or panic into a reported failure.
    pub fn run<F>(&self, handle: super::SubscriptionHandle, task: F)
    where
        F: FnOnce() -> super::Result<()>,
    {
        match catch_unwind(AssertUnwindSafe(task)) {
            Ok(Ok(())) => {
                self.metrics.record_completed();
            }
            Ok(Err(e)) => self.fail(e),
            Err(panic_info) => self.fail(LoggerError::subscriber_failure(
                handle,
                format!("callback panicked: {}", panic_message(&*panic_info)),
            )),
        }
    }

    pub fn fail(&self, error: LoggerError) {
        self.metrics.record_failed();
        self.report(&error);
    }

    fn report(&self, error: &LoggerError) {
        match &self.on_failure {
            Some(callback) => {
                let reported = catch_unwind(AssertUnwindSafe(|| callback(error)));
                if let Err(panic_info) = reported {
                    eprintln!(
                        "[LOGGER CRITICAL] Failure callback panicked: {} (while reporting: {})",
                        panic_message(&*panic_info),
                        error
                    );
                }
            }
            None => eprintln!("[LOGGER ERROR] {}", error),
        }
    }
}
