//! Error types for the callback logger

use super::subscription::SubscriptionHandle;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Rejected registration input (missing callback, bad path, bad severity)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Unregister called with a handle that is not in the table
    #[error("No {kind} callback registered under handle {handle}")]
    NotFound {
        kind: &'static str,
        handle: SubscriptionHandle,
    },

    /// `log()` called with a malformed entry; nothing was dispatched
    #[error("Invalid log entry: {reason}")]
    InvalidEntry { reason: String },

    /// A delivery failed. Never returned to callers of `log()`.
    #[error("Subscriber {handle} failed: {message}")]
    SubscriberFailure {
        handle: SubscriptionHandle,
        message: String,
        #[source]
        source: Option<Box<LoggerError>>,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Worker thread could not be started
    #[error("Failed to spawn logger worker thread: {source}")]
    WorkerSpawn {
        #[source]
        source: std::io::Error,
    },

    /// Handles are never reused, so the counter can run out
    #[error("Subscription handle space exhausted")]
    HandlesExhausted,

    /// Logger already stopped
    #[error("Logger already stopped")]
    LoggerStopped,
}

impl LoggerError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(kind: &'static str, handle: SubscriptionHandle) -> Self {
        LoggerError::NotFound { kind, handle }
    }

    pub fn invalid_entry(reason: impl Into<String>) -> Self {
        LoggerError::InvalidEntry {
            reason: reason.into(),
        }
    }

    pub fn subscriber_failure(handle: SubscriptionHandle, message: impl Into<String>) -> Self {
        LoggerError::SubscriberFailure {
            handle,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a sink error, keeping it as the source
    pub fn subscriber_error(handle: SubscriptionHandle, source: LoggerError) -> Self {
        LoggerError::SubscriberFailure {
            handle,
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }
}
