//! Counted completion for fan-out work.
//!
//! A [`CompletionGroup`] waits for a known number of participants to report
//! and then fires a one-shot callback with everything they produced. The
//! first error short-circuits: the callback fires immediately with that error
//! and every later report is ignored.
//!
//! ```
//! use horizon_dropzone_core::CompletionGroup;
//!
//! let group = CompletionGroup::<u32, String>::new(2, |result| {
//!     assert_eq!(result.map(|v| v.len()), Ok(1));
//! });
//!
//! group.report(Ok(Some(7)));
//! group.report(Ok(None));
//! assert!(group.is_complete());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

type Completion<T, E> = Box<dyn FnOnce(Result<Vec<T>, E>) + Send + 'static>;

struct GroupState<T, E> {
    remaining: usize,
    items: Vec<T>,
    completion: Option<Completion<T, E>>,
}

/// A counting barrier with an error channel that preempts the join.
///
/// Cloning the group yields another handle for a participant.
pub struct CompletionGroup<T, E> {
    state: Arc<Mutex<GroupState<T, E>>>,
}

impl<T, E> Clone for CompletionGroup<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Send + 'static, E: Send + 'static> CompletionGroup<T, E> {
    /// Create a group expecting `participants` reports.
    ///
    /// A group with zero participants completes immediately with an empty list.
    pub fn new<F>(participants: usize, on_complete: F) -> Self
    where
        F: FnOnce(Result<Vec<T>, E>) + Send + 'static,
    {
        let group = Self {
            state: Arc::new(Mutex::new(GroupState {
                remaining: participants,
                items: Vec::with_capacity(participants),
                completion: Some(Box::new(on_complete)),
            })),
        };

        if participants == 0 {
            group.finish(Ok(Vec::new()));
        }
        group
    }

    /// Report the outcome of one participant.
    ///
    /// `Ok(Some(item))` collects the item, `Ok(None)` only counts the
    /// participant as done, `Err(e)` completes the group with `e` unless it
    /// already completed.
    pub fn report(&self, outcome: Result<Option<T>, E>) {
        let ready = {
            let mut state = self.state.lock();
            if state.completion.is_none() {
                return;
            }
            match outcome {
                Ok(item) => {
                    if let Some(item) = item {
                        state.items.push(item);
                    }
                    state.remaining = state.remaining.saturating_sub(1);
                    if state.remaining == 0 {
                        let items = std::mem::take(&mut state.items);
                        state.completion.take().map(|done| (done, Ok(items)))
                    } else {
                        None
                    }
                }
                Err(err) => state.completion.take().map(|done| (done, Err(err))),
            }
        };

        // Run the callback outside the lock.
        if let Some((done, result)) = ready {
            done(result);
        }
    }

    /// Returns true once the callback has fired.
    pub fn is_complete(&self) -> bool {
        self.state.lock().completion.is_none()
    }

    /// Number of participants that have not reported yet.
    pub fn remaining(&self) -> usize {
        self.state.lock().remaining
    }

    fn finish(&self, result: Result<Vec<T>, E>) {
        let done = self.state.lock().completion.take();
        if let Some(done) = done {
            done(result);
        }
    }
}

impl<T, E> std::fmt::Debug for CompletionGroup<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CompletionGroup")
            .field("remaining", &state.remaining)
            .field("collected", &state.items.len())
            .field("complete", &state.completion.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recording_group(
        participants: usize,
    ) -> (CompletionGroup<u32, String>, Arc<Mutex<Vec<Result<Vec<u32>, String>>>>) {
        let results = Arc::new(Mutex::new(Vec::new()));
        let results_clone = results.clone();
        let group = CompletionGroup::new(participants, move |result| {
            results_clone.lock().push(result);
        });
        (group, results)
    }

    #[test]
    fn test_completes_after_all_reports() {
        let (group, results) = recording_group(3);

        group.report(Ok(Some(1)));
        group.report(Ok(Some(2)));
        assert!(results.lock().is_empty());
        assert_eq!(group.remaining(), 1);

        group.report(Ok(Some(3)));
        assert_eq!(*results.lock(), vec![Ok(vec![1, 2, 3])]);
        assert!(group.is_complete());
    }

    #[test]
    fn test_empty_reports_count_toward_join() {
        let (group, results) = recording_group(2);

        group.report(Ok(None));
        group.report(Ok(Some(9)));

        assert_eq!(*results.lock(), vec![Ok(vec![9])]);
    }

    #[test]
    fn test_error_short_circuits() {
        let (group, results) = recording_group(3);

        group.report(Ok(Some(1)));
        group.report(Err("boom".to_string()));
        assert_eq!(*results.lock(), vec![Err("boom".to_string())]);

        // Late reports are ignored.
        group.report(Ok(Some(2)));
        group.report(Err("second".to_string()));
        assert_eq!(results.lock().len(), 1);
    }

    #[test]
    fn test_zero_participants_completes_immediately() {
        let (group, results) = recording_group(0);
        assert!(group.is_complete());
        assert_eq!(*results.lock(), vec![Ok(vec![])]);
    }

    #[test]
    fn test_concurrent_reports_fire_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        let group = CompletionGroup::<usize, ()>::new(64, move |result| {
            assert_eq!(result.map(|v| v.len()), Ok(64));
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let group = group.clone();
                std::thread::spawn(move || group.report(Ok(Some(i))))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
