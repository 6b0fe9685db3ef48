//! Worker pool for blocking background work.
//!
//! Item providers may block while they hand over data, so fetches run on a
//! rayon pool instead of the UI thread. Results either come back through a
//! [`TaskHandle`] or are posted to a [`MainQueue`].
//!
//! ```
//! use horizon_dropzone_core::{MainQueue, ThreadPool, ThreadPoolConfig};
//!
//! let pool = ThreadPool::new(ThreadPoolConfig::with_threads(2)).unwrap();
//! assert_eq!(pool.spawn(|| 6 * 7).wait(), Some(42));
//!
//! let queue = MainQueue::new();
//! pool.spawn_with_callback(|| "resolved", &queue, |text| assert_eq!(text, "resolved"));
//! # queue.process_pending_timeout(std::time::Duration::from_secs(5)).unwrap();
//! ```

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crossbeam_channel::{Receiver, bounded};
use rayon::{ThreadPool as RayonThreadPool, ThreadPoolBuilder};

use crate::error::{CoreError, ThreadPoolError};
use crate::logging::targets;
use crate::queue::MainQueue;

static GLOBAL_POOL: OnceLock<Arc<ThreadPool>> = OnceLock::new();
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// Receives the result of a task started with [`ThreadPool::spawn`].
///
/// A task that panics never delivers a result; the waiting methods then
/// return `None`.
#[derive(Debug)]
pub struct TaskHandle<T> {
    id: u64,
    result: Receiver<T>,
}

impl<T> TaskHandle<T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns true once the result is available.
    pub fn is_finished(&self) -> bool {
        !self.result.is_empty()
    }

    /// Take the result if it is already available.
    pub fn try_get(&self) -> Option<T> {
        self.result.try_recv().ok()
    }

    /// Block until the task finishes.
    pub fn wait(self) -> Option<T> {
        self.result.recv().ok()
    }

    /// Block for at most `timeout`.
    pub fn wait_timeout(self, timeout: Duration) -> Option<T> {
        self.result.recv_timeout(timeout).ok()
    }
}

/// How to build a [`ThreadPool`].
#[derive(Debug, Clone)]
pub struct ThreadPoolConfig {
    /// Worker count; `None` lets rayon pick one per CPU.
    pub num_threads: Option<usize>,
    /// Prefix of worker thread names, suffixed with the worker index.
    pub thread_name: String,
    pub stack_size: Option<usize>,
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name: "dropzone-worker".to_string(),
            stack_size: None,
        }
    }
}

impl ThreadPoolConfig {
    /// Default settings with a fixed worker count.
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
            ..Self::default()
        }
    }
}

/// A rayon pool that counts its in-flight tasks.
pub struct ThreadPool {
    pool: RayonThreadPool,
    in_flight: Arc<AtomicUsize>,
}

impl ThreadPool {
    /// The process-wide pool, built with default settings on first use
    /// unless [`init_global`](Self::init_global) ran before.
    pub fn global() -> Arc<ThreadPool> {
        GLOBAL_POOL
            .get_or_init(|| {
                Arc::new(
                    ThreadPool::new(ThreadPoolConfig::default())
                        .expect("failed to build the global worker pool"),
                )
            })
            .clone()
    }

    /// Build the process-wide pool from `config`.
    ///
    /// Fails with [`ThreadPoolError::AlreadyInitialized`] once the global pool
    /// exists, including when [`global`](Self::global) created it.
    pub fn init_global(config: ThreadPoolConfig) -> Result<Arc<ThreadPool>, CoreError> {
        let pool = Arc::new(ThreadPool::new(config)?);
        if GLOBAL_POOL.set(pool.clone()).is_err() {
            crate::dropzone_warn!("global worker pool already initialized");
            return Err(ThreadPoolError::AlreadyInitialized.into());
        }
        Ok(pool)
    }

    pub fn new(config: ThreadPoolConfig) -> Result<Self, CoreError> {
        let ThreadPoolConfig {
            num_threads,
            thread_name,
            stack_size,
        } = config;

        let mut builder = ThreadPoolBuilder::new()
            .thread_name(move |index| format!("{thread_name}-{index}"))
            .panic_handler(|_| {
                tracing::error!(target: targets::THREADPOOL, "worker task panicked")
            });
        if let Some(num_threads) = num_threads {
            builder = builder.num_threads(num_threads);
        }
        if let Some(stack_size) = stack_size {
            builder = builder.stack_size(stack_size);
        }

        let pool = builder
            .build()
            .map_err(|err| ThreadPoolError::CreationFailed(err.to_string()))?;
        crate::dropzone_debug!(threads = pool.current_num_threads(), "worker pool built");

        Ok(Self {
            pool,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Number of spawned tasks that have not finished.
    pub fn active_tasks(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run `task` on the pool and return a handle to its result.
    pub fn spawn<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
        let (sender, result) = bounded(1);
        self.spawn_detached(move || {
            // The handle may have been dropped; the result is then discarded.
            let _ = sender.send(task());
        });
        TaskHandle { id, result }
    }

    /// Run `task` on the pool without tracking its completion.
    pub fn spawn_detached<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let guard = InFlightGuard(self.in_flight.clone());
        self.pool.spawn(move || {
            let _guard = guard;
            task();
        });
    }

    /// Run `task` on the pool, then `callback` with its result on the thread
    /// that owns `queue`.
    pub fn spawn_with_callback<F, T, C>(&self, task: F, queue: &MainQueue, callback: C)
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        let queue = queue.clone();
        self.spawn_detached(move || {
            let value = task();
            queue.post(move || callback(value));
        });
    }

    /// Run `task` inside the pool and wait for it.
    pub fn execute<F, T>(&self, task: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        self.pool.install(task)
    }

    /// Run tasks that borrow from the caller; returns once all finished.
    pub fn scope<'scope, F, T>(&self, f: F) -> T
    where
        F: FnOnce(&rayon::Scope<'scope>) -> T + Send,
        T: Send,
    {
        self.pool.scope(f)
    }
}

/// Decrements the in-flight count when a task ends, including by panic.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let remaining = self.0.fetch_sub(1, Ordering::AcqRel) - 1;
        tracing::trace!(target: targets::THREADPOOL, remaining, "task finished");
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("num_threads", &self.num_threads())
            .field("active_tasks", &self.active_tasks())
            .finish()
    }
}
