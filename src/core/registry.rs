//! Subscription registry
//!
//! One exclusive lock guards both tables and the handle counter. Dispatch
//! never holds it while delivering: it copies the `Arc`s out with
//! [`SubscriptionRegistry::snapshot`] and releases the lock, so registration
//! and delivery never wait on each other.

use super::error::{LoggerError, Result};
use super::filter::Filter;
use super::subscription::{FileSubscription, FunctionSubscription, LogCallback, SubscriptionHandle};
use crate::appenders::FileAppender;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Default)]
struct Tables {
    last_handle: u32,
    functions: BTreeMap<SubscriptionHandle, Arc<FunctionSubscription>>,
    files: BTreeMap<SubscriptionHandle, Arc<FileSubscription>>,
}

impl Tables {
    fn next_handle(&mut self) -> Result<SubscriptionHandle> {
        let next = self
            .last_handle
            .checked_add(1)
            .ok_or(LoggerError::HandlesExhausted)?;
        self.last_handle = next;
        Ok(SubscriptionHandle::new(next))
    }
}

/// Subscriptions current at the moment of a `log()` call.
///
/// Entries are in registration order.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub files: Vec<Arc<FileSubscription>>,
    pub functions: Vec<Arc<FunctionSubscription>>,
}

#[derive(Default)]
pub struct SubscriptionRegistry {
    tables: Mutex<Tables>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_function(
        &self,
        callback: LogCallback,
        filter: Filter,
    ) -> Result<SubscriptionHandle> {
        filter.validate()?;

        let mut tables = self.tables.lock();
        let handle = tables.next_handle()?;
        tables.functions.insert(
            handle,
            Arc::new(FunctionSubscription {
                handle,
                callback,
                filter,
            }),
        );
        Ok(handle)
    }

    /// Opens the file before taking the lock; an unopenable path never
    /// consumes a handle.
    pub fn register_file(
        &self,
        path: impl Into<PathBuf>,
        filter: Filter,
    ) -> Result<SubscriptionHandle> {
        filter.validate()?;
        let sink = FileAppender::new(path)?;

        let mut tables = self.tables.lock();
        let handle = tables.next_handle()?;
        tables.files.insert(
            handle,
            Arc::new(FileSubscription {
                handle,
                sink,
                filter,
            }),
        );
        Ok(handle)
    }

    pub fn unregister_function(&self, handle: SubscriptionHandle) -> Result<()> {
        self.tables
            .lock()
            .functions
            .remove(&handle)
            .map(|_| ())
            .ok_or_else(|| LoggerError::not_found("function", handle))
    }

    pub fn unregister_file(&self, handle: SubscriptionHandle) -> Result<()> {
        self.tables
            .lock()
            .files
            .remove(&handle)
            .map(|_| ())
            .ok_or_else(|| LoggerError::not_found("file", handle))
    }

    pub fn snapshot(&self) -> Snapshot {
        let tables = self.tables.lock();
        Snapshot {
            files: tables.files.values().cloned().collect(),
            functions: tables.functions.values().cloned().collect(),
        }
    }

    pub fn function_count(&self) -> usize {
        self.tables.lock().functions.len()
    }

    pub fn file_count(&self) -> usize {
        self.tables.lock().files.len()
    }

    /// Drop every subscription. The handle counter keeps its value.
    pub fn clear(&self) {
        let mut tables = self.tables.lock();
        tables.functions.clear();
        tables.files.clear();
    }
}
