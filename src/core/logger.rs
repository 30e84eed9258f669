//! Main logger implementation

use super::{
    component::ComponentId,
    diagnostics::{DeliveryBoundary, FailureCallback},
    dispatch::Dispatcher,
    error::{LoggerError, Result},
    executor::{Executor, InlineExecutor, WorkerPool},
    filter::Filter,
    guard::{SubscriptionGuard, SubscriptionKind},
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    registry::SubscriptionRegistry,
    severity::Severity,
    subscription::{LogCallback, SubscriptionHandle},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Worker count used by [`LoggerBuilder::new`]
pub const DEFAULT_WORKER_COUNT: usize = 1;

/// Worker threads are named `<prefix>-<index>`
pub const DEFAULT_THREAD_NAME: &str = "callback-logger";

/// Fans log entries out to registered callbacks and files.
///
/// Each instance owns its own registry, handle counter and execution model;
/// nothing is process-global.
///
/// Callbacks that need the logger should capture a `Weak<Logger>`: the
/// registry keeps callbacks alive, so a captured `Arc<Logger>` would keep the
/// logger alive forever.
///
/// # Example
///
/// ```
/// use callback_logger::{ComponentId, Logger, Severity};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let logger = Logger::single_threaded();
/// let net = ComponentId::named("Subsystem", 0);
///
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// logger
///     .register_function_callback(
///         move |_entry| {
///             counter.fetch_add(1, Ordering::Relaxed);
///         },
///         Severity::Info,
///     )
///     .unwrap();
///
/// logger.log(Severity::Warning, net.clone(), "link flapping", file!(), line!()).unwrap();
/// logger.log(Severity::Debug, net, "noise", file!(), line!()).unwrap();
/// assert_eq!(seen.load(Ordering::Relaxed), 1);
/// ```
pub struct Logger {
    registry: Arc<SubscriptionRegistry>,
    dispatcher: Dispatcher,
    metrics: Arc<LoggerMetrics>,
    stopped: AtomicBool,
}

impl Logger {
    /// `worker_count == 0` delivers synchronously on the logging thread;
    /// otherwise that many worker threads are spawned.
    pub fn new(worker_count: usize) -> Result<Self> {
        Self::builder().worker_count(worker_count).build()
    }

    /// Synchronous logger; never spawns threads
    #[must_use]
    pub fn single_threaded() -> Self {
        let metrics = Arc::new(LoggerMetrics::new());
        let boundary = Arc::new(DeliveryBoundary::new(Arc::clone(&metrics), None));
        Self::from_parts(metrics, Box::new(InlineExecutor::new(boundary)))
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use callback_logger::Logger;
    ///
    /// let logger = Logger::builder()
    ///     .worker_count(4)
    ///     .thread_name("audit-log")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.worker_count(), 4);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// `metrics` must be the instance the executor's boundary records into
    fn from_parts(metrics: Arc<LoggerMetrics>, executor: Box<dyn Executor>) -> Self {
        let registry = Arc::new(SubscriptionRegistry::new());
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&registry), executor, Arc::clone(&metrics)),
            registry,
            metrics,
            stopped: AtomicBool::new(false),
        }
    }

    fn ensure_running(&self) -> Result<()> {
        if self.stopped.load(Ordering::Acquire) {
            Err(LoggerError::LoggerStopped)
        } else {
            Ok(())
        }
    }

    /// Register a callback for entries matching `filter`.
    ///
    /// `filter` accepts any of the filter shapes: a [`Severity`] threshold, a
    /// single [`ComponentId`], a set of components, a component → severity
    /// map, or a [`Filter`] built directly. Registering the same callback
    /// twice yields two independent subscriptions.
    pub fn register_function_callback<F>(
        &self,
        callback: F,
        filter: impl Into<Filter>,
    ) -> Result<SubscriptionHandle>
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        self.register_shared_callback(Some(Arc::new(callback)), filter)
    }

    /// Register an already shared callback.
    ///
    /// Binding layers that may receive no callback at all pass `None` and get
    /// `InvalidArgument` back.
    pub fn register_shared_callback(
        &self,
        callback: Option<LogCallback>,
        filter: impl Into<Filter>,
    ) -> Result<SubscriptionHandle> {
        self.ensure_running()?;
        let callback = callback
            .ok_or_else(|| LoggerError::invalid_argument("function callback cannot be null"))?;
        self.registry.register_function(callback, filter.into())
    }

    /// Append a line to `path` for every entry matching `filter`.
    ///
    /// The file is opened (and created if missing) now and stays open until
    /// the subscription is removed.
    pub fn register_file_callback(
        &self,
        path: impl Into<PathBuf>,
        filter: impl Into<Filter>,
    ) -> Result<SubscriptionHandle> {
        self.ensure_running()?;
        self.registry.register_file(path, filter.into())
    }

    /// Deliveries already in flight for `handle` still complete.
    pub fn unregister_function_callback(&self, handle: SubscriptionHandle) -> Result<()> {
        self.registry.unregister_function(handle)
    }

    pub fn unregister_file_callback(&self, handle: SubscriptionHandle) -> Result<()> {
        self.registry.unregister_file(handle)
    }

    /// Like [`register_function_callback`](Self::register_function_callback),
    /// unregistering when the returned guard drops.
    pub fn subscribe_function<F>(
        self: &Arc<Self>,
        callback: F,
        filter: impl Into<Filter>,
    ) -> Result<SubscriptionGuard>
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        let handle = self.register_function_callback(callback, filter)?;
        Ok(SubscriptionGuard::new(
            Arc::downgrade(self),
            handle,
            SubscriptionKind::Function,
        ))
    }

    /// Like [`register_file_callback`](Self::register_file_callback),
    /// unregistering when the returned guard drops.
    pub fn subscribe_file(
        self: &Arc<Self>,
        path: impl Into<PathBuf>,
        filter: impl Into<Filter>,
    ) -> Result<SubscriptionGuard> {
        let handle = self.register_file_callback(path, filter)?;
        Ok(SubscriptionGuard::new(
            Arc::downgrade(self),
            handle,
            SubscriptionKind::File,
        ))
    }

    /// Log one entry.
    ///
    /// The entry is validated and timestamped here; an invalid entry returns
    /// `InvalidEntry` and reaches no subscriber. Subscriber failures are never
    /// returned from this call.
    pub fn log(
        &self,
        severity: Severity,
        component: impl Into<ComponentId>,
        message: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Result<()> {
        let entry = LogEntry::new(
            severity,
            component.into(),
            message.into(),
            file.into(),
            line,
        )
        .inspect_err(|_| {
            self.metrics.record_rejected();
        })?;
        self.ensure_running()?;

        self.metrics.record_logged();
        if self.dispatcher.dispatch(entry)? == 0 {
            // An empty snapshot may come from a shutdown clearing the registry
            self.ensure_running()?;
        }
        Ok(())
    }

    /// Stop the logger, draining queued deliveries first.
    ///
    /// Idempotent. Afterwards `log()` and registration return
    /// `LoggerStopped` and every subscription is released. Racing `log()`
    /// against `shutdown()` from another thread has no defined outcome
    /// beyond one of the two winning.
    pub fn shutdown(&self) {
        self.stop(None);
    }

    /// [`shutdown`](Self::shutdown) that gives up waiting after `timeout`.
    ///
    /// Returns `true` if every worker finished in time.
    ///
    /// ```
    /// use callback_logger::Logger;
    /// use std::time::Duration;
    ///
    /// let logger = Logger::new(2).unwrap();
    /// assert!(logger.shutdown_timeout(Duration::from_secs(5)));
    /// ```
    pub fn shutdown_timeout(&self, timeout: Duration) -> bool {
        self.stop(Some(timeout))
    }

    fn stop(&self, timeout: Option<Duration>) -> bool {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return true;
        }
        let drained = self.dispatcher.executor().shutdown(timeout);
        self.registry.clear();
        drained
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Wait until every delivery scheduled so far has run.
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            if self.metrics.pending_deliveries() == 0 {
                return true;
            }
            if start.elapsed() >= timeout {
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn function_callback_count(&self) -> usize {
        self.registry.function_count()
    }

    pub fn file_callback_count(&self) -> usize {
        self.registry.file_count()
    }

    pub fn worker_count(&self) -> usize {
        self.dispatcher.executor().worker_count()
    }

    pub fn is_single_threaded(&self) -> bool {
        self.worker_count() == 0
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();

        let failed = self.metrics.deliveries_failed();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} failed deliveries (failure rate: {:.2}%)",
                failed,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use callback_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .worker_count(2)
///     .on_delivery_failure(Arc::new(|err| {
///         eprintln!("ALERT: {}", err);
///     }))
///     .build()
///     .unwrap();
/// # drop(logger);
/// ```
pub struct LoggerBuilder {
    worker_count: usize,
    thread_name: String,
    on_delivery_failure: Option<FailureCallback>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            on_delivery_failure: None,
        }
    }

    /// 0 selects synchronous delivery
    #[must_use = "builder methods return a new value"]
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn single_threaded(self) -> Self {
        self.worker_count(0)
    }

    #[must_use = "builder methods return a new value"]
    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name = prefix.into();
        self
    }

    /// Route contained delivery failures to `callback` instead of stderr.
    #[must_use = "builder methods return a new value"]
    pub fn on_delivery_failure(mut self, callback: FailureCallback) -> Self {
        self.on_delivery_failure = Some(callback);
        self
    }

    pub fn build(self) -> Result<Logger> {
        let LoggerBuilder {
            worker_count,
            thread_name,
            on_delivery_failure,
        } = self;

        let metrics = Arc::new(LoggerMetrics::new());
        let boundary = Arc::new(DeliveryBoundary::new(
            Arc::clone(&metrics),
            on_delivery_failure,
        ));
        let executor: Box<dyn Executor> = if worker_count == 0 {
            Box::new(InlineExecutor::new(boundary))
        } else {
            Box::new(WorkerPool::spawn(worker_count, &thread_name, boundary)?)
        };

        Ok(Logger::from_parts(metrics, executor))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn comp(value: u32) -> ComponentId {
        ComponentId::named("LoggerTest", value)
    }

    fn collector() -> (Arc<Mutex<Vec<String>>>, impl Fn(&LogEntry) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |entry: &LogEntry| sink.lock().push(entry.message.clone()))
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build().unwrap();
        assert_eq!(logger.worker_count(), DEFAULT_WORKER_COUNT);
        assert!(!logger.is_single_threaded());
    }

    #[test]
    fn test_builder_single_threaded() {
        let logger = Logger::builder().single_threaded().build().unwrap();
        assert!(logger.is_single_threaded());
        assert_eq!(Logger::new(0).unwrap().worker_count(), 0);
    }

    #[test]
    fn test_worker_threads_named() {
        let logger = Logger::builder()
            .worker_count(1)
            .thread_name("named-pool")
            .build()
            .unwrap();
        let names = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&names);
        logger
            .register_function_callback(
                move |_| sink.lock().push(thread::current().name().map(String::from)),
                Filter::all(),
            )
            .unwrap();
        logger.log(Severity::Info, comp(0), "x", "t.rs", 1).unwrap();
        logger.shutdown();
        assert_eq!(names.lock().as_slice(), [Some("named-pool-0".to_string())]);
    }

    #[test]
    fn test_sync_delivery_in_registration_order() {
        let logger = Logger::single_threaded();
        let order = Arc::new(Mutex::new(Vec::new()));
        for id in 0..3 {
            let order = Arc::clone(&order);
            logger
                .register_function_callback(move |_| order.lock().push(id), Severity::Debug)
                .unwrap();
        }
        logger.log(Severity::Info, comp(0), "x", "t.rs", 1).unwrap();
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_null_callback_rejected() {
        let logger = Logger::single_threaded();
        let err = logger
            .register_shared_callback(None, Filter::all())
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidArgument { .. }));
        assert_eq!(logger.function_callback_count(), 0);
    }

    #[test]
    fn test_invalid_entry_counts_rejection() {
        let logger = Logger::single_threaded();
        let (seen, callback) = collector();
        logger.register_function_callback(callback, Filter::all()).unwrap();

        assert!(logger.log(Severity::Info, comp(0), "", "t.rs", 1).is_err());
        assert_eq!(logger.metrics().entries_rejected(), 1);
        assert_eq!(logger.metrics().entries_logged(), 0);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_panicking_callback_does_not_stop_others() {
        let failures = Arc::new(AtomicUsize::new(0));
        let failure_count = Arc::clone(&failures);
        let logger = Logger::builder()
            .single_threaded()
            .on_delivery_failure(Arc::new(move |_| {
                failure_count.fetch_add(1, Ordering::SeqCst);
            }))
            .build()
            .unwrap();

        logger
            .register_function_callback(|_| panic!("subscriber bug"), Filter::all())
            .unwrap();
        let (seen, callback) = collector();
        logger.register_function_callback(callback, Filter::all()).unwrap();

        assert!(logger.log(Severity::Error, comp(0), "still delivered", "t.rs", 3).is_ok());
        assert_eq!(seen.lock().as_slice(), ["still delivered"]);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
        assert_eq!(logger.metrics().deliveries_failed(), 1);
    }

    #[test]
    fn test_shutdown_is_idempotent_and_final() {
        let logger = Logger::new(2).unwrap();
        let (_seen, callback) = collector();
        logger.register_function_callback(callback, Filter::all()).unwrap();

        logger.shutdown();
        logger.shutdown();
        assert!(logger.is_stopped());
        assert_eq!(logger.function_callback_count(), 0);
        assert!(matches!(
            logger.log(Severity::Info, comp(0), "late", "t.rs", 1),
            Err(LoggerError::LoggerStopped)
        ));
        assert!(matches!(
            logger.register_function_callback(|_| {}, Filter::all()),
            Err(LoggerError::LoggerStopped)
        ));
    }

    #[test]
    fn test_callback_may_use_logger_through_weak() {
        let logger = Arc::new(Logger::single_threaded());
        let weak = Arc::downgrade(&logger);
        let handle = Arc::new(Mutex::new(None));
        let own_handle = Arc::clone(&handle);
        let registered = logger
            .register_function_callback(
                move |_| {
                    // Unregister itself on first delivery
                    if let (Some(logger), Some(h)) = (weak.upgrade(), own_handle.lock().take()) {
                        logger.unregister_function_callback(h).unwrap();
                    }
                },
                Filter::all(),
            )
            .unwrap();
        *handle.lock() = Some(registered);

        logger.log(Severity::Info, comp(0), "one", "t.rs", 1).unwrap();
        assert_eq!(logger.function_callback_count(), 0);
        assert_eq!(Arc::strong_count(&logger), 1);
    }

    #[test]
    fn test_wait_idle() {
        let logger = Logger::new(2).unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        logger
            .register_function_callback(
                move |_| {
                    thread::sleep(Duration::from_millis(2));
                    counter.fetch_add(1, Ordering::SeqCst);
                },
                Filter::all(),
            )
            .unwrap();
        for line in 1..=20 {
            logger.log(Severity::Info, comp(0), "m", "t.rs", line).unwrap();
        }
        assert!(logger.wait_idle(Duration::from_secs(10)));
        assert_eq!(count.load(Ordering::SeqCst), 20);
        assert_eq!(logger.metrics().pending_deliveries(), 0);
    }
}
