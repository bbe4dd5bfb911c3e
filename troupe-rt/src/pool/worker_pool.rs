// Layer 1: Standard library imports
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

// Layer 2: Third-party crate imports
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

// Layer 3: Internal module imports
use crate::fatal;
use crate::mailbox::Fifo;

/// A unit of work accepted by the pool.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

struct PoolQueue {
    tasks: Fifo<Task>,
    shutdown: bool,
}

struct PoolShared {
    queue: Mutex<PoolQueue>,
    /// Signalled when a task arrives or shutdown is raised.
    available: Condvar,
}

/// Fixed set of worker threads consuming tasks from a shared FIFO queue.
///
/// Workers are started once at construction and their count never changes.
/// Each worker loops: wait until a task is queued or shutdown is raised;
/// exit only once shutdown is raised *and* the queue is empty; otherwise pop
/// one task and run it outside the lock. Every task accepted before
/// [`WorkerPool::shutdown`] is therefore eventually executed, in the order
/// it was submitted.
///
/// The pool never interprets its tasks.
///
/// # Example
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use troupe_rt::pool::WorkerPool;
///
/// let pool = WorkerPool::new(2);
/// let counter = Arc::new(AtomicUsize::new(0));
/// for _ in 0..10 {
///     let counter = Arc::clone(&counter);
///     pool.submit(Box::new(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     }));
/// }
/// pool.shutdown();
/// assert_eq!(counter.load(Ordering::SeqCst), 10);
/// ```
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start a pool of `size` worker threads.
    pub fn new(size: usize) -> Self {
        let shared = Arc::new(PoolShared {
            queue: Mutex::new(PoolQueue {
                tasks: Fifo::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            let shared = Arc::clone(&shared);
            let builder = thread::Builder::new().name(format!("troupe-worker-{index}"));
            match builder.spawn(move || worker_loop(&shared)) {
                Ok(handle) => workers.push(handle),
                Err(err) => fatal!("failed to start worker thread {index}: {err}"),
            }
        }

        debug!(workers = size, "worker pool started");
        Self { shared, workers }
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Enqueue a task and wake one waiting worker.
    ///
    /// Submitting after [`WorkerPool::shutdown`] is a contract violation and
    /// terminates the process through the fatal reporter.
    pub fn submit(&self, task: Task) {
        let mut queue = self.shared.queue.lock();
        if queue.shutdown {
            drop(queue);
            fatal!("task submitted after worker pool shutdown");
        }
        queue.tasks.push(task);
        self.shared.available.notify_one();
    }

    /// Raise shutdown, let the workers drain the queue, and join them all.
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        {
            let mut queue = self.shared.queue.lock();
            queue.shutdown = true;
        }
        self.shared.available.notify_all();

        let current = thread::current().id();
        for handle in self.workers.drain(..) {
            // Shutdown can run on a worker when the last system handle is
            // dropped inside a dispatch task; a thread cannot join itself.
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                fatal!("worker thread panicked");
            }
        }
        debug!("worker pool shut down");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            self.shutdown_inner();
        }
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers.len())
            .finish()
    }
}

fn worker_loop(shared: &PoolShared) {
    trace!("worker started");
    loop {
        let task = {
            let mut queue = shared.queue.lock();
            loop {
                if let Some(task) = queue.tasks.pop() {
                    break task;
                }
                if queue.shutdown {
                    trace!("worker exiting");
                    return;
                }
                shared.available.wait(&mut queue);
            }
        };
        task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_pool_runs_tasks() {
        let pool = WorkerPool::new(4);
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..64 {
            let counter = Arc::clone(&counter);
            pool.submit(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        pool.shutdown();
        assert_eq!(counter.load(Ordering::SeqCst), 64);
    }

    #[test]
    fn test_shutdown_drains_queue() {
        // A single slow worker guarantees tasks are still queued when
        // shutdown is raised; all of them must run anyway.
        let pool = WorkerPool::new(1);
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..16 {
            let counter = Arc::clone(&counter);
            pool.submit(Box::new(move || {
                thread::sleep(Duration::from_millis(1));
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        pool.shutdown();
        assert_eq!(counter.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn test_single_worker_preserves_order() {
        let pool = WorkerPool::new(1);
        let log = Arc::new(Mutex::new(Vec::new()));
        for i in 0..32 {
            let log = Arc::clone(&log);
            pool.submit(Box::new(move || {
                log.lock().push(i);
            }));
        }
        pool.shutdown();
        let log = log.lock();
        assert_eq!(*log, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_worker_count_is_constant() {
        let pool = WorkerPool::new(3);
        assert_eq!(pool.size(), 3);
        pool.shutdown();
    }

    #[test]
    fn test_shutdown_without_tasks() {
        let pool = WorkerPool::new(2);
        pool.shutdown();
    }

    #[test]
    fn test_drop_joins_workers() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::new(2);
            for _ in 0..8 {
                let counter = Arc::clone(&counter);
                pool.submit(Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }));
            }
            // Dropped without an explicit shutdown call.
        }
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }
}
