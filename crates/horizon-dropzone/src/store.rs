//! The state container driving a drop zone.
//!
//! [`Store::send`] runs the reducer under the state lock, notifies observers
//! and then runs the returned effect. Fetch completions come back through the
//! [`MainQueue`], so [`DropZoneAction::FileUrlsLoaded`] is always dispatched
//! on the thread that drains the queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use horizon_dropzone_core::logging::targets;
use horizon_dropzone_core::{MainQueue, Signal, ThreadPool};
use parking_lot::Mutex;

use crate::action::DropZoneAction;
use crate::fetcher::fetch_file_urls;
use crate::reducer::{Effect, reduce};
use crate::state::DropZoneState;

struct StoreInner {
    state: Mutex<DropZoneState>,
    pool: Arc<ThreadPool>,
    queue: MainQueue,
    action_dispatched: Signal<DropZoneAction>,
    state_changed: Signal<DropZoneState>,
    trace_actions: AtomicBool,
}

/// Cloneable handle to a drop zone's state, worker pool and main queue.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Create a store running effects on `pool` and completing them on `queue`.
    pub fn new(initial: DropZoneState, pool: Arc<ThreadPool>, queue: MainQueue) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial),
                pool,
                queue,
                action_dispatched: Signal::new(),
                state_changed: Signal::new(),
                trace_actions: AtomicBool::new(false),
            }),
        }
    }

    /// Create a store using the global worker pool.
    pub fn with_global_pool(initial: DropZoneState, queue: MainQueue) -> Self {
        Self::new(initial, ThreadPool::global(), queue)
    }

    /// Dispatch an action.
    pub fn send(&self, action: DropZoneAction) {
        let tracing_enabled = self.inner.trace_actions.load(Ordering::Relaxed);
        if tracing_enabled {
            tracing::debug!(target: targets::STORE, action = ?action, "dispatching action");
        } else {
            tracing::trace!(target: targets::STORE, action = action.name(), "dispatching action");
        }

        let notification = action.clone();
        let (effect, changed) = {
            let mut state = self.inner.state.lock();
            let before = state.clone();
            let effect = reduce(&mut state, action);
            let changed = (*state != before).then(|| state.clone());
            (effect, changed)
        };

        if tracing_enabled && !effect.is_none() {
            tracing::debug!(target: targets::STORE, effect = ?effect, "running effect");
        }

        self.inner.action_dispatched.emit(notification);
        if let Some(snapshot) = changed {
            self.inner.state_changed.emit(snapshot);
        }
        self.run_effect(effect);
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> DropZoneState {
        self.inner.state.lock().clone()
    }

    /// Borrow the current state.
    ///
    /// Must not dispatch from inside `f`.
    pub fn with_state<R>(&self, f: impl FnOnce(&DropZoneState) -> R) -> R {
        f(&self.inner.state.lock())
    }

    /// Emitted after every dispatched action.
    pub fn action_dispatched(&self) -> &Signal<DropZoneAction> {
        &self.inner.action_dispatched
    }

    /// Emitted with a snapshot whenever an action changed the state.
    pub fn state_changed(&self) -> &Signal<DropZoneState> {
        &self.inner.state_changed
    }

    /// The queue fetch completions are delivered through.
    pub fn queue(&self) -> &MainQueue {
        &self.inner.queue
    }

    /// The pool effects run on.
    pub fn pool(&self) -> &Arc<ThreadPool> {
        &self.inner.pool
    }

    /// Log every action and effect at `debug` level.
    pub fn set_action_tracing(&self, enabled: bool) {
        self.inner.trace_actions.store(enabled, Ordering::Relaxed);
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::FetchFileUrls {
                providers,
                accepted_types,
            } => {
                let store = Arc::downgrade(&self.inner);
                let queue = self.inner.queue.clone();
                fetch_file_urls(&self.inner.pool, providers, &accepted_types, move |outcome| {
                    queue.post(move || deliver(store, DropZoneAction::FileUrlsLoaded(outcome)));
                });
            }
        }
    }
}

/// Dispatch a completion unless the store has been dropped meanwhile.
fn deliver(store: Weak<StoreInner>, action: DropZoneAction) {
    match store.upgrade() {
        Some(inner) => Store { inner }.send(action),
        None => {
            tracing::debug!(
                target: targets::STORE,
                action = action.name(),
                "store dropped, discarding completion"
            );
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.lock())
            .field("queue", &self.inner.queue)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use horizon_dropzone_core::ThreadPoolConfig;
    use url::Url;

    use super::*;
    use crate::provider::{DataItemProvider, PathItemProvider, SharedItemProvider};

    fn store() -> Store {
        let pool = Arc::new(ThreadPool::new(ThreadPoolConfig::with_threads(2)).unwrap());
        Store::new(DropZoneState::default(), pool, MainQueue::new())
    }

    #[test]
    fn test_send_applies_reducer_and_notifies() {
        let store = store();
        let dispatched = Arc::new(AtomicUsize::new(0));
        let changes = Arc::new(Mutex::new(Vec::new()));

        let counter = dispatched.clone();
        store.action_dispatched().connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let seen = changes.clone();
        store
            .state_changed()
            .connect(move |state: &DropZoneState| seen.lock().push(state.targeted));

        store.send(DropZoneAction::Targeted(true));
        store.send(DropZoneAction::Targeted(true));
        store.send(DropZoneAction::Targeted(false));

        assert_eq!(dispatched.load(Ordering::SeqCst), 3);
        assert_eq!(*changes.lock(), vec![true, false]);
        assert!(!store.state().targeted);
    }

    #[test]
    fn test_slots_may_dispatch_reentrantly() {
        let store = store();
        store.set_action_tracing(true);
        let inner = store.clone();
        store.action_dispatched().connect(move |action| {
            if matches!(action, DropZoneAction::MultipleFilesNotAllowed) {
                inner.send(DropZoneAction::AlertDismissed);
            }
        });

        store.send(DropZoneAction::MultipleFilesNotAllowed);
        assert_eq!(store.with_state(|s| s.alert.clone()), None);
    }

    #[test]
    fn test_fetch_completion_arrives_through_queue() {
        let store = store();
        let url = Url::parse("file:///tmp/dropped.txt").unwrap();
        let providers: Vec<SharedItemProvider> = vec![Arc::new(DataItemProvider::from_url(&url))];

        store.send(DropZoneAction::FileDropped(providers));
        assert!(store.state().result.is_none());

        let processed = store
            .queue()
            .process_pending_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(processed, 1);
        assert_eq!(store.state().result, Some(Ok(vec![url])));
    }

    #[test]
    fn test_completion_after_drop_is_discarded() {
        let queue = MainQueue::new();
        let pool = Arc::new(ThreadPool::new(ThreadPoolConfig::with_threads(1)).unwrap());
        let store = Store::new(DropZoneState::default(), pool.clone(), queue.clone());
        let providers = PathItemProvider::from_paths([PathBuf::from("/tmp/gone.txt")]);
        let names = Arc::new(Mutex::new(Vec::new()));
        let recorder = names.clone();
        store
            .action_dispatched()
            .connect(move |action: &DropZoneAction| recorder.lock().push(action.name()));

        store.send(DropZoneAction::FileDropped(providers));
        drop(store);

        assert_eq!(queue.process_pending_timeout(Duration::from_secs(5)).unwrap(), 1);
        assert_eq!(*names.lock(), vec!["file_dropped"]);
    }
}
