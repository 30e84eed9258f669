//! Execution model
//!
//! Deliveries are run by one of two executors chosen when the logger is
//! built:
//!
//! - [`InlineExecutor`] runs them on the thread that called `log()`, in
//!   submission order. Used when background threads are not welcome.
//! - [`WorkerPool`] hands them to N worker threads over a FIFO queue;
//!   `log()` returns as soon as they are queued.

use super::diagnostics::{panic_message, DeliveryBoundary};
use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::subscription::{FileSubscription, FunctionSubscription, SubscriptionHandle};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// One subscription's delivery of one entry.
#[derive(Debug)]
pub enum Delivery {
    File {
        subscription: Arc<FileSubscription>,
        entry: Arc<LogEntry>,
    },
    Function {
        subscription: Arc<FunctionSubscription>,
        entry: Arc<LogEntry>,
    },
}

impl Delivery {
    pub fn handle(&self) -> SubscriptionHandle {
        match self {
            Delivery::File { subscription, .. } => subscription.handle(),
            Delivery::Function { subscription, .. } => subscription.handle(),
        }
    }

    pub fn entry(&self) -> &LogEntry {
        match self {
            Delivery::File { entry, .. } | Delivery::Function { entry, .. } => &**entry,
        }
    }

    fn run(&self) -> Result<()> {
        match self {
            Delivery::File {
                subscription,
                entry,
            } => subscription.deliver(entry),
            Delivery::Function {
                subscription,
                entry,
            } => subscription.deliver(entry),
        }
    }
}

fn execute_one(boundary: &DeliveryBoundary, delivery: Delivery) {
    boundary.run(delivery.handle(), || delivery.run());
}

/// Uniform interface over the two execution modes.
pub trait Executor: Send + Sync {
    /// Accept deliveries for execution. Fails with `LoggerStopped` (having
    /// run nothing) once the executor is shut down.
    fn execute(&self, deliveries: Vec<Delivery>) -> Result<()>;

    /// Stop accepting work and drain what is queued.
    ///
    /// Returns `false` if `timeout` elapsed first; remaining work still
    /// drains in the background. Calling it again is a no-op returning `true`.
    fn shutdown(&self, timeout: Option<Duration>) -> bool;

    /// 0 for inline execution
    fn worker_count(&self) -> usize;
}

/// Runs every delivery on the calling thread.
pub struct InlineExecutor {
    boundary: Arc<DeliveryBoundary>,
}

impl InlineExecutor {
    pub fn new(boundary: Arc<DeliveryBoundary>) -> Self {
        Self { boundary }
    }
}

impl Executor for InlineExecutor {
    fn execute(&self, deliveries: Vec<Delivery>) -> Result<()> {
        for delivery in deliveries {
            execute_one(&self.boundary, delivery);
        }
        Ok(())
    }

    fn shutdown(&self, _timeout: Option<Duration>) -> bool {
        true
    }

    fn worker_count(&self) -> usize {
        0
    }
}

/// Fixed set of worker threads consuming one shared FIFO queue.
///
/// Shutdown closes the queue; workers finish everything already queued and
/// then exit.
pub struct WorkerPool {
    sender: RwLock<Option<Sender<Delivery>>>,
    workers: Mutex<Vec<thread::JoinHandle<()>>>,
    worker_count: usize,
    boundary: Arc<DeliveryBoundary>,
}

impl WorkerPool {
    /// Spawn `worker_count` threads named `<name_prefix>-<index>`.
    pub fn spawn(
        worker_count: usize,
        name_prefix: &str,
        boundary: Arc<DeliveryBoundary>,
    ) -> Result<Self> {
        if worker_count == 0 {
            return Err(LoggerError::invalid_argument(
                "worker pool needs at least one worker",
            ));
        }

        let (sender, receiver) = unbounded::<Delivery>();
        let mut workers = Vec::with_capacity(worker_count);

        for index in 0..worker_count {
            let receiver = receiver.clone();
            let worker_boundary = Arc::clone(&boundary);
            let spawned = thread::Builder::new()
                .name(format!("{}-{}", name_prefix, index))
                .spawn(move || Self::worker_loop(receiver, worker_boundary));

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    // Closing the queue lets the workers already started exit
                    drop(sender);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(LoggerError::WorkerSpawn { source });
                }
            }
        }

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            workers: Mutex::new(workers),
            worker_count,
            boundary,
        })
    }

    fn worker_loop(receiver: Receiver<Delivery>, boundary: Arc<DeliveryBoundary>) {
        // recv() keeps yielding queued deliveries after the sender is gone
        // and only errors once the queue is empty
        while let Ok(delivery) = receiver.recv() {
            execute_one(&boundary, delivery);
        }
    }

    fn join_workers(workers: Vec<thread::JoinHandle<()>>, timeout: Option<Duration>) -> bool {
        let current = thread::current().id();
        let start = Instant::now();
        let mut completed = true;
        let mut timed_out = false;

        for handle in workers {
            // A delivery running on a worker may trigger the shutdown itself
            if handle.thread().id() == current {
                continue;
            }

            if let Some(timeout) = timeout {
                while !handle.is_finished() && start.elapsed() < timeout {
                    thread::sleep(Duration::from_millis(1));
                }
                if !handle.is_finished() {
                    completed = false;
                    timed_out = true;
                    continue;
                }
            }

            if let Err(panic_info) = handle.join() {
                eprintln!(
                    "[LOGGER ERROR] Worker thread panicked during shutdown: {}",
                    panic_message(&*panic_info)
                );
                completed = false;
            }
        }

        if timed_out {
            eprintln!(
                "[LOGGER WARNING] Worker threads did not finish within {:?}. \
                 Queued deliveries continue in the background.",
                timeout.unwrap_or_default()
            );
        }
        completed
    }
}

impl Executor for WorkerPool {
    fn execute(&self, deliveries: Vec<Delivery>) -> Result<()> {
        let sender = self.sender.read();
        let sender = sender.as_ref().ok_or(LoggerError::LoggerStopped)?;

        for delivery in deliveries {
            if let Err(crossbeam_channel::SendError(delivery)) = sender.send(delivery) {
                // Only possible if every worker is gone
                self.boundary.fail(LoggerError::subscriber_failure(
                    delivery.handle(),
                    "worker pool is no longer running",
                ));
            }
        }
        Ok(())
    }

    fn shutdown(&self, timeout: Option<Duration>) -> bool {
        drop(self.sender.write().take());
        let workers = std::mem::take(&mut *self.workers.lock());
        Self::join_workers(workers, timeout)
    }

    fn worker_count(&self) -> usize {
        self.worker_count
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown(None);
    }
}
