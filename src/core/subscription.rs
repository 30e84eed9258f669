//! Registered subscriptions and their handles

use super::error::{LoggerError, Result};
use super::filter::Filter;
use super::log_entry::LogEntry;
use crate::appenders::FileAppender;
use std::fmt;
use std::sync::Arc;

/// Callback invoked once per matching entry.
///
/// May run on a worker thread, so it must be `Send + Sync`.
pub type LogCallback = Arc<dyn Fn(&LogEntry) + Send + Sync>;

/// Identifies one registration. Handles start at 1 and are never reused by
/// the logger that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionHandle(u32);

impl SubscriptionHandle {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SubscriptionHandle> for u32 {
    fn from(handle: SubscriptionHandle) -> Self {
        handle.0
    }
}

pub struct FunctionSubscription {
    pub(crate) handle: SubscriptionHandle,
    pub(crate) callback: LogCallback,
    pub(crate) filter: Filter,
}

impl FunctionSubscription {
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub(crate) fn deliver(&self, entry: &LogEntry) -> Result<()> {
        (self.callback)(entry);
        Ok(())
    }
}

impl fmt::Debug for FunctionSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSubscription")
            .field("handle", &self.handle)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Owns its open append stream; the stream closes when the last snapshot
/// referencing the subscription is dropped.
#[derive(Debug)]
pub struct FileSubscription {
    pub(crate) handle: SubscriptionHandle,
    pub(crate) sink: FileAppender,
    pub(crate) filter: Filter,
}

impl FileSubscription {
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn path(&self) -> &std::path::Path {
        self.sink.path()
    }

    pub(crate) fn deliver(&self, entry: &LogEntry) -> Result<()> {
        self.sink
            .append(entry)
            .map_err(|e| LoggerError::subscriber_error(self.handle, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ComponentId, Severity, SubscriptionRegistry};

    #[cfg(target_os = "linux")]
    #[test]
    fn test_file_write_failure_keeps_io_source() {
        let registry = SubscriptionRegistry::new();
        // Every write to /dev/full fails with ENOSPC
        let handle = registry.register_file("/dev/full", Filter::all()).unwrap();
        let subscription = registry.snapshot().files.remove(0);
        let entry = LogEntry::new(
            Severity::Error,
            ComponentId::named("Disk", 0),
            "lost".into(),
            "disk.rs".into(),
            1,
        )
        .unwrap();

        let err = subscription.deliver(&entry).unwrap_err();
        assert!(matches!(err, LoggerError::SubscriberFailure { handle: h, .. } if h == handle));
        let sink_err = std::error::Error::source(&err).expect("sink error kept");
        let io_err = std::error::Error::source(sink_err).expect("io error kept");
        assert!(io_err.downcast_ref::<std::io::Error>().is_some());
    }
}
