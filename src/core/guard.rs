//! Scoped subscriptions

use super::logger::Logger;
use super::subscription::SubscriptionHandle;
use std::fmt;
use std::sync::Weak;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubscriptionKind {
    Function,
    File,
}

/// Unregisters its subscription when dropped.
///
/// Holds only a weak reference, so a guard never keeps the logger alive.
/// Dropping it after the subscription was already removed (or after the
/// logger is gone) does nothing.
///
/// # Example
///
/// ```
/// use callback_logger::{Logger, Severity};
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::single_threaded());
/// {
///     let _guard = logger.subscribe_function(|_| {}, Severity::Info).unwrap();
///     assert_eq!(logger.function_callback_count(), 1);
/// }
/// assert_eq!(logger.function_callback_count(), 0);
/// ```
#[must_use = "dropping the guard unregisters the subscription immediately"]
pub struct SubscriptionGuard {
    logger: Weak<Logger>,
    handle: SubscriptionHandle,
    kind: SubscriptionKind,
    armed: bool,
}

impl SubscriptionGuard {
    pub(crate) fn new(logger: Weak<Logger>, handle: SubscriptionHandle, kind: SubscriptionKind) -> Self {
        Self {
            logger,
            handle,
            kind,
            armed: true,
        }
    }

    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    pub fn is_file(&self) -> bool {
        self.kind == SubscriptionKind::File
    }

    /// Keep the subscription registered; the caller takes over the handle.
    pub fn detach(mut self) -> SubscriptionHandle {
        self.armed = false;
        self.handle
    }
}

impl fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("armed", &self.armed)
            .finish()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(logger) = self.logger.upgrade() {
            // NotFound here just means someone unregistered it first
            let _ = match self.kind {
                SubscriptionKind::Function => logger.unregister_function_callback(self.handle),
                SubscriptionKind::File => logger.unregister_file_callback(self.handle),
            };
        }
    }
}
