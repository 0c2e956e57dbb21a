//! Background task pool.
//!
//! The frame loop is single-threaded; work that must not stall it (listener
//! deliveries, for instance) is handed to this pool as detached async tasks.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use async_executor::Executor;

/// A fixed set of worker threads ticking a shared executor.
///
/// # Example
///
/// ```
/// use std::sync::mpsc;
/// use kite_core::task_pool::TaskPool;
///
/// let mut pool = TaskPool::new(1).unwrap();
/// let (tx, rx) = mpsc::channel();
/// pool.spawn_detached(async move {
///     let _ = tx.send(21 * 2);
/// });
/// assert_eq!(rx.recv().unwrap(), 42);
/// pool.shutdown();
/// ```
pub struct TaskPool {
    executor: Arc<Executor<'static>>,
    threads: Vec<thread::JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl TaskPool {
    /// Create a pool with `num_threads` workers (at least one).
    pub fn new(num_threads: usize) -> io::Result<Self> {
        let num_threads = num_threads.max(1);
        let executor = Arc::new(Executor::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut threads = Vec::with_capacity(num_threads);

        for i in 0..num_threads {
            let exec = executor.clone();
            let shutdown_flag = shutdown.clone();

            let handle = thread::Builder::new()
                .name(format!("kite-task-{}", i))
                .spawn(move || {
                    while !shutdown_flag.load(Ordering::Relaxed) {
                        if !exec.try_tick() {
                            thread::sleep(Duration::from_millis(1));
                        }
                    }
                });

            match handle {
                Ok(handle) => threads.push(handle),
                Err(e) => {
                    shutdown.store(true, Ordering::Relaxed);
                    return Err(e);
                }
            }
        }

        tracing::debug!("TaskPool created with {} threads", num_threads);

        Ok(Self {
            executor,
            threads,
            shutdown,
        })
    }

    /// Spawn a fire-and-forget task.
    pub fn spawn_detached(&self, future: impl Future<Output = ()> + Send + 'static) {
        self.executor.spawn(future).detach();
    }

    /// Stop the workers and wait for them to exit.
    ///
    /// Tasks that have not started yet never run. Calling this twice is a
    /// no-op.
    pub fn shutdown(&mut self) {
        if self.threads.is_empty() {
            return;
        }
        tracing::debug!("Shutting down TaskPool with {} threads", self.threads.len());
        self.shutdown.store(true, Ordering::Relaxed);

        for handle in std::mem::take(&mut self.threads) {
            if let Err(e) = handle.join() {
                tracing::error!("Task pool thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    fn run_counted(pool: &TaskPool, tasks: usize) -> Arc<AtomicUsize> {
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..tasks {
            let counter = counter.clone();
            pool.spawn_detached(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        counter
    }

    fn wait_for(counter: &AtomicUsize, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while counter.load(Ordering::SeqCst) < expected && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_detached_tasks_run() {
        let pool = TaskPool::new(2).unwrap();
        let counter = run_counted(&pool, 5);
        wait_for(&counter, 5);
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_zero_threads_still_runs_tasks() {
        let pool = TaskPool::new(0).unwrap();
        let counter = run_counted(&pool, 3);
        wait_for(&counter, 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_no_tasks_run_after_shutdown() {
        let mut pool = TaskPool::new(2).unwrap();
        pool.shutdown();
        pool.shutdown();

        let counter = run_counted(&pool, 3);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
