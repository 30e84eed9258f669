//! Core logger types and traits

pub mod component;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod filter;
pub mod guard;
pub mod log_entry;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod severity;
pub mod subscription;
pub mod timestamp;

pub use component::{Component, ComponentId, ComponentTag, Resolved};
pub use diagnostics::{DeliveryBoundary, FailureCallback};
pub use dispatch::Dispatcher;
pub use error::{LoggerError, Result};
pub use executor::{Delivery, Executor, InlineExecutor, WorkerPool};
pub use filter::Filter;
pub use guard::SubscriptionGuard;
pub use log_entry::LogEntry;
pub use logger::{Logger, LoggerBuilder, DEFAULT_THREAD_NAME, DEFAULT_WORKER_COUNT};
pub use metrics::LoggerMetrics;
pub use registry::{Snapshot, SubscriptionRegistry};
pub use severity::Severity;
pub use subscription::{FileSubscription, FunctionSubscription, LogCallback, SubscriptionHandle};
pub use timestamp::TIMESTAMP_FORMAT;
