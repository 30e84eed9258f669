//! # Callback Logger
//!
//! A severity- and component-filtered log fan-out library. Producers call
//! [`Logger::log`]; every registered subscriber whose [`Filter`] accepts the
//! entry receives it, either as a function callback or as a line appended to
//! a file.
//!
//! ## Features
//!
//! - **Per-subscriber filtering**: minimum severity, a component set, or a
//!   per-component severity map
//! - **Typed components**: any fieldless enum is a component taxonomy via
//!   [`impl_component!`]; equal values from different taxonomies never match
//! - **Two execution modes**: synchronous delivery on the logging thread, or
//!   a worker pool that drains on shutdown
//! - **Contained failures**: a panicking callback or failing file write is
//!   reported and counted, never propagated
//!
//! ## Example
//!
//! ```
//! use callback_logger::prelude::*;
//!
//! #[derive(Debug, Clone, Copy)]
//! enum Subsystem {
//!     Network,
//!     Storage,
//! }
//! callback_logger::impl_component!(Subsystem);
//!
//! let logger = Logger::new(2).unwrap();
//! logger
//!     .register_function_callback(
//!         |entry| println!("{} {}", entry.component, entry.message),
//!         Filter::from_map([(Subsystem::Storage, Severity::Warning)]),
//!     )
//!     .unwrap();
//!
//! logger
//!     .log(Severity::Error, Subsystem::Storage, "disk full", file!(), line!())
//!     .unwrap();
//! logger
//!     .log(Severity::Error, Subsystem::Network, "filtered out", file!(), line!())
//!     .unwrap();
//! logger.shutdown();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::FileAppender;
    pub use crate::core::{
        Component, ComponentId, FailureCallback, Filter, LogCallback, LogEntry, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, Resolved, Result, Severity,
        SubscriptionGuard, SubscriptionHandle,
    };
}

pub use appenders::FileAppender;
pub use core::{
    Component, ComponentId, ComponentTag, FailureCallback, Filter, LogCallback, LogEntry, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, Resolved, Result, Severity, SubscriptionGuard,
    SubscriptionHandle, DEFAULT_WORKER_COUNT,
};
