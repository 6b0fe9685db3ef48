//! Main-thread task queue.
//!
//! A [`MainQueue`] is a serialized execution context bound to the thread that
//! created it (normally the UI thread). Any thread may [`post`](MainQueue::post)
//! closures to it; only the owning thread drains and runs them. Worker pool
//! callbacks use it to hand results back to the thread that owns widget state.
//!
//! Hosts integrate the queue with their event loop through a waker: the waker
//! runs after every post and typically sends a user event through a winit
//! `EventLoopProxy`, whose handler then calls [`MainQueue::process_pending`].
//!
//! ```
//! use horizon_dropzone_core::MainQueue;
//!
//! let queue = MainQueue::new();
//! let remote = queue.clone();
//! std::thread::spawn(move || {
//!     remote.post(|| println!("runs on the owning thread"));
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(queue.process_pending().unwrap(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use parking_lot::Mutex;

use crate::error::{CoreError, Result};
use crate::logging::targets;
use crate::thread_check::ThreadAffinity;

/// A unique identifier for a posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask = Box<dyn FnOnce() + Send + 'static>;
type Waker = Arc<dyn Fn() + Send + Sync + 'static>;

struct QueuedTask {
    id: TaskId,
    task: BoxedTask,
}

struct QueueInner {
    sender: Sender<QueuedTask>,
    receiver: Receiver<QueuedTask>,
    affinity: ThreadAffinity,
    waker: Mutex<Option<Waker>>,
}

/// A multi-producer task queue drained by a single owning thread.
///
/// Cloning the queue yields another handle to the same queue.
#[derive(Clone)]
pub struct MainQueue {
    inner: Arc<QueueInner>,
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MainQueue {
    /// Create a queue owned by the calling thread.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            inner: Arc::new(QueueInner {
                sender,
                receiver,
                affinity: ThreadAffinity::current(),
                waker: Mutex::new(None),
            }),
        }
    }

    /// The thread affinity of this queue.
    pub fn affinity(&self) -> ThreadAffinity {
        self.inner.affinity
    }

    /// Returns true if the calling thread owns this queue.
    pub fn is_owner_thread(&self) -> bool {
        self.inner.affinity.is_same_thread()
    }

    /// Install a waker invoked after every post.
    ///
    /// The waker runs on the posting thread and must not block.
    pub fn set_waker<F>(&self, waker: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.inner.waker.lock() = Some(Arc::new(waker));
    }

    /// Remove the installed waker, if any.
    pub fn clear_waker(&self) {
        *self.inner.waker.lock() = None;
    }

    /// Post a task to run on the owning thread.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        // The queue holds its own receiver, so the channel cannot be disconnected.
        let _ = self.inner.sender.send(QueuedTask {
            id,
            task: Box::new(task),
        });
        tracing::trace!(target: targets::QUEUE, task_id = id.as_u64(), "task posted");

        let waker = self.inner.waker.lock().clone();
        if let Some(waker) = waker {
            waker();
        }
        id
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.inner.receiver.is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.inner.receiver.len()
    }

    /// Run every task that was pending when the call started.
    ///
    /// Tasks posted while draining are left for the next call. Returns the
    /// number of tasks executed.
    pub fn process_pending(&self) -> Result<usize> {
        self.check_owner("MainQueue::process_pending")?;
        let count = self.inner.receiver.len();
        let mut executed = 0;
        for _ in 0..count {
            match self.inner.receiver.try_recv() {
                Ok(queued) => {
                    Self::run(queued);
                    executed += 1;
                }
                Err(_) => break,
            }
        }
        Ok(executed)
    }

    /// Wait up to `timeout` for a task, then drain the queue.
    ///
    /// Returns the number of tasks executed, zero if the timeout elapsed.
    pub fn process_pending_timeout(&self, timeout: Duration) -> Result<usize> {
        self.check_owner("MainQueue::process_pending_timeout")?;
        match self.inner.receiver.recv_timeout(timeout) {
            Ok(queued) => {
                Self::run(queued);
                Ok(1 + self.process_pending()?)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Ok(0),
        }
    }

    fn run(queued: QueuedTask) {
        tracing::trace!(target: targets::QUEUE, task_id = queued.id.as_u64(), "running task");
        (queued.task)();
    }

    fn check_owner(&self, operation: &'static str) -> Result<()> {
        if self.inner.affinity.is_same_thread() {
            Ok(())
        } else {
            tracing::error!(
                target: targets::QUEUE,
                operation,
                "main queue drained off its owning thread"
            );
            Err(CoreError::WrongThread { operation })
        }
    }
}

impl std::fmt::Debug for MainQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainQueue")
            .field("owner", &self.inner.affinity.thread_id())
            .field("pending", &self.pending_count())
            .finish()
    }
}
