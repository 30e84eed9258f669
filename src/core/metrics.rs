//! Logger metrics for observability
//!
//! Counters for entries accepted or rejected by `log()` and for the
//! deliveries they fanned out to. The pending count is what
//! [`Logger::wait_idle`](crate::Logger::wait_idle) polls.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use callback_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_scheduled(2);
/// metrics.record_completed();
///
/// assert_eq!(metrics.pending_deliveries(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    entries_logged: AtomicU64,
    entries_rejected: AtomicU64,
    deliveries_scheduled: AtomicU64,
    deliveries_completed: AtomicU64,
    deliveries_failed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            entries_logged: AtomicU64::new(0),
            entries_rejected: AtomicU64::new(0),
            deliveries_scheduled: AtomicU64::new(0),
            deliveries_completed: AtomicU64::new(0),
            deliveries_failed: AtomicU64::new(0),
        }
    }

    /// Entries that passed validation
    #[inline]
    pub fn entries_logged(&self) -> u64 {
        self.entries_logged.load(Ordering::Relaxed)
    }

    /// `log()` calls refused with `InvalidEntry`
    #[inline]
    pub fn entries_rejected(&self) -> u64 {
        self.entries_rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries_scheduled(&self) -> u64 {
        self.deliveries_scheduled.load(Ordering::Acquire)
    }

    #[inline]
    pub fn deliveries_completed(&self) -> u64 {
        self.deliveries_completed.load(Ordering::Acquire)
    }

    #[inline]
    pub fn deliveries_failed(&self) -> u64 {
        self.deliveries_failed.load(Ordering::Acquire)
    }

    /// Deliveries handed to the executor that have not finished yet
    pub fn pending_deliveries(&self) -> u64 {
        let finished = self.deliveries_completed() + self.deliveries_failed();
        self.deliveries_scheduled().saturating_sub(finished)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.entries_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.entries_rejected.fetch_add(1, Ordering::Relaxed)
    }

    /// Must run before the deliveries are submitted so the pending count
    /// never dips below zero.
    #[inline]
    pub fn record_scheduled(&self, count: u64) -> u64 {
        self.deliveries_scheduled.fetch_add(count, Ordering::AcqRel)
    }

    /// Undo a schedule that the executor refused
    #[inline]
    pub(crate) fn record_unscheduled(&self, count: u64) -> u64 {
        self.deliveries_scheduled.fetch_sub(count, Ordering::AcqRel)
    }

    #[inline]
    pub fn record_completed(&self) -> u64 {
        self.deliveries_completed.fetch_add(1, Ordering::AcqRel)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.deliveries_failed.fetch_add(1, Ordering::AcqRel)
    }

    /// Failed deliveries as a percentage (0.0 - 100.0) of finished ones
    pub fn failure_rate(&self) -> f64 {
        let failed = self.deliveries_failed();
        let finished = failed + self.deliveries_completed();
        if finished == 0 {
            0.0
        } else {
            (failed as f64 / finished as f64) * 100.0
        }
    }
}
