//! Core systems for Horizon Dropzone.
//!
//! This crate provides the runtime pieces the drop-zone widget is built on:
//!
//! - **Signal/Slot System**: type-safe notification of dispatched actions and
//!   state changes
//! - **Main Queue**: a serialized execution context bound to the UI thread
//! - **Thread Pool**: rayon-backed background work with UI-thread callbacks
//! - **Completion Group**: a counting join with an error channel that
//!   preempts the join
//!
//! # Fan-out Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_dropzone_core::{CompletionGroup, MainQueue, ThreadPool};
//!
//! let queue = MainQueue::new();
//! let pool = ThreadPool::global();
//!
//! let on_ui = queue.clone();
//! let group = CompletionGroup::<u32, String>::new(3, move |result| {
//!     on_ui.post(move || println!("joined: {result:?}"));
//! });
//!
//! for n in 0..3 {
//!     let group = group.clone();
//!     pool.spawn_detached(move || group.report(Ok(Some(n * n))));
//! }
//!
//! queue.process_pending_timeout(Duration::from_secs(5)).unwrap();
//! ```

mod error;
pub mod join;
pub mod logging;
pub mod queue;
pub mod signal;
pub mod thread_check;
pub mod threadpool;

pub use error::{CoreError, Result, ThreadPoolError};
pub use join::CompletionGroup;
pub use logging::PerfSpan;
pub use queue::{MainQueue, TaskId};
pub use signal::{ConnectionId, ConnectionType, Signal};
pub use thread_check::ThreadAffinity;
pub use threadpool::{TaskHandle, ThreadPool, ThreadPoolConfig};
