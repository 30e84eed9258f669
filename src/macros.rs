//! Logging macros for ergonomic log message formatting.
//!
//! These macros format the message like `format!` and fill in the call site
//! (`file!()` / `line!()`) automatically. Each expands to a
//! [`Logger::log`](crate::Logger::log) call and evaluates to its `Result`.
//!
//! # Examples
//!
//! ```
//! use callback_logger::prelude::*;
//! use callback_logger::{impl_component, info};
//!
//! #[derive(Debug, Clone, Copy)]
//! enum Subsystem {
//!     Http,
//! }
//! impl_component!(Subsystem);
//!
//! let logger = Logger::single_threaded();
//!
//! // Basic logging
//! info!(logger, Subsystem::Http, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, Subsystem::Http, "Server listening on port {}", port).unwrap();
//! ```

/// Make fieldless enums usable as component taxonomies.
///
/// Implements [`Component`](crate::Component) and `From<T> for ComponentId`
/// for each listed type. The enum must be `Copy`; its discriminant is the
/// component value.
///
/// Discriminants must be non-negative and fit in `u32`. The conversion is an
/// `as` cast, so a negative or wider discriminant (e.g. under `#[repr(i64)]`)
/// wraps and may collide with another variant's value.
///
/// ```
/// use callback_logger::{impl_component, ComponentId};
///
/// #[derive(Debug, Clone, Copy)]
/// enum Storage {
///     Disk,
///     Cache,
/// }
///
/// #[derive(Debug, Clone, Copy)]
/// #[repr(u32)]
/// enum Port {
///     Http = 80,
///     Highest = u32::MAX,
/// }
/// impl_component!(Storage, Port);
///
/// assert_eq!(ComponentId::from(Storage::Cache).value(), 1);
/// assert_eq!(ComponentId::from(Storage::Disk).to_string(), "Storage#0");
/// assert_eq!(ComponentId::from(Port::Http).value(), 80);
/// assert_eq!(ComponentId::from(Port::Highest).value(), u32::MAX);
/// ```
#[macro_export]
macro_rules! impl_component {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::Component for $t {
                fn value(self) -> u32 {
                    self as u32
                }
            }

            impl ::std::convert::From<$t> for $crate::ComponentId {
                fn from(component: $t) -> Self {
                    $crate::Component::component_id(component)
                }
            }
        )+
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use callback_logger::prelude::*;
/// # let logger = Logger::single_threaded();
/// use callback_logger::log;
/// let db = ComponentId::named("Db", 3);
/// log!(logger, Severity::Info, db.clone(), "Simple message").unwrap();
/// log!(logger, Severity::Error, db, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $component:expr, $($arg:tt)+) => {
        $logger.log(
            $severity,
            $component,
            ::std::format!($($arg)+),
            ::std::file!(),
            ::std::line!(),
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $component:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $component, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $component:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $component, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use callback_logger::prelude::*;
/// # let logger = Logger::single_threaded();
/// use callback_logger::warning;
/// warning!(logger, ComponentId::named("Disk", 0), "Retry attempt {} of {}", 3, 5).unwrap();
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $component:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $component, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $component:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $component, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $component:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $component, $($arg)+)
    };
}
