//! End-to-end drop handling: window events in, fetch on the pool, result on the
//! owning thread.

use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded};
use horizon_dropzone::{
    ContentType, DataItemProvider, DropZone, DropZoneAction, DropZoneConfig, DropZoneState,
    FetchError, FetchOutcome, ItemProvider, SharedItemProvider, Store, fetch_file_urls,
};
use horizon_dropzone_core::{MainQueue, ThreadPool, ThreadPoolConfig};
use url::Url;
use winit::event::WindowEvent;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn pool() -> Arc<ThreadPool> {
    Arc::new(ThreadPool::new(ThreadPoolConfig::with_threads(4)).unwrap())
}

/// Provider that blocks until released, then serves a location.
#[derive(Debug)]
struct GatedProvider {
    gate: Arc<Barrier>,
    url: Url,
}

impl ItemProvider for GatedProvider {
    fn registered_types(&self) -> Vec<ContentType> {
        vec![ContentType::FILE_URL]
    }

    fn load_data(&self, _: &ContentType) -> Result<Option<Vec<u8>>, FetchError> {
        self.gate.wait();
        Ok(Some(self.url.as_str().as_bytes().to_vec()))
    }
}

#[derive(Debug)]
struct FailingProvider;

impl ItemProvider for FailingProvider {
    fn registered_types(&self) -> Vec<ContentType> {
        vec![ContentType::FILE_URL]
    }

    fn load_data(&self, _: &ContentType) -> Result<Option<Vec<u8>>, FetchError> {
        Err(FetchError::new("The item is no longer available."))
    }
}

#[test]
fn test_error_wins_while_other_provider_is_still_loading() {
    setup();
    let pool = pool();
    let gate = Arc::new(Barrier::new(2));
    let providers: Vec<SharedItemProvider> = vec![
        Arc::new(GatedProvider {
            gate: gate.clone(),
            url: Url::parse("file:///tmp/slow.txt").unwrap(),
        }),
        Arc::new(FailingProvider),
    ];

    let (tx, rx) = unbounded::<FetchOutcome>();
    fetch_file_urls(&pool, providers, &[ContentType::FILE_URL], move |outcome| {
        tx.send(outcome).unwrap();
    });

    let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(outcome, Err(FetchError::new("The item is no longer available.")));

    // Releasing the slow provider must not produce a second completion.
    gate.wait();
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn test_fan_out_runs_pairs_concurrently() {
    setup();
    let pool = pool();
    // Both loads must be in flight at once for the barrier to open.
    let gate = Arc::new(Barrier::new(2));
    let providers: Vec<SharedItemProvider> = ["file:///a.txt", "file:///b.txt"]
        .into_iter()
        .map(|url| {
            Arc::new(GatedProvider {
                gate: gate.clone(),
                url: Url::parse(url).unwrap(),
            }) as SharedItemProvider
        })
        .collect();

    let (tx, rx) = bounded(1);
    fetch_file_urls(&pool, providers, &[ContentType::FILE_URL], move |outcome| {
        tx.send(outcome).unwrap();
    });

    let mut urls: Vec<String> = rx
        .recv_timeout(Duration::from_secs(5))
        .unwrap()
        .unwrap()
        .into_iter()
        .map(String::from)
        .collect();
    urls.sort();
    assert_eq!(urls, vec!["file:///a.txt", "file:///b.txt"]);
}

#[cfg(unix)]
#[test]
fn test_window_drop_produces_result_on_owning_thread() {
    setup();
    let queue = MainQueue::new();
    let mut zone = DropZone::new(DropZoneConfig::default(), pool(), queue.clone()).unwrap();
    zone.store().set_action_tracing(true);

    let owner = std::thread::current().id();
    let (tx, rx) = unbounded::<DropZoneState>();
    zone.store().state_changed().connect(move |state: &DropZoneState| {
        if state.result.is_some() {
            assert_eq!(std::thread::current().id(), owner);
            tx.send(state.clone()).unwrap();
        }
    });

    for name in ["/tmp/one.txt", "/tmp/two.txt"] {
        zone.handle_window_event(&WindowEvent::HoveredFile(PathBuf::from(name)));
    }
    assert!(zone.state().targeted);
    for name in ["/tmp/two.txt", "/tmp/one.txt"] {
        zone.handle_window_event(&WindowEvent::DroppedFile(PathBuf::from(name)));
    }
    assert!(!zone.state().targeted);

    assert_eq!(queue.process_pending_timeout(Duration::from_secs(5)).unwrap(), 1);
    let state = rx.try_recv().unwrap();
    let mut urls: Vec<String> = state
        .result
        .unwrap()
        .unwrap()
        .into_iter()
        .map(String::from)
        .collect();
    urls.sort();
    assert_eq!(urls, vec!["file:///tmp/one.txt", "file:///tmp/two.txt"]);
}

#[test]
fn test_queued_observer_sees_actions_in_order() {
    setup();
    let queue = MainQueue::new();
    let store = Store::new(DropZoneState::default(), pool(), queue.clone());

    let (tx, rx) = unbounded::<&'static str>();
    store
        .action_dispatched()
        .connect_queued(&queue, move |action: &DropZoneAction| {
            tx.send(action.name()).unwrap();
        });

    let url = Url::parse("file:///tmp/x.txt").unwrap();
    store.send(DropZoneAction::Targeted(true));
    store.send(DropZoneAction::FileDropped(vec![Arc::new(DataItemProvider::from_url(&url))]));
    assert!(rx.try_recv().is_err());

    // Two queued notifications plus the fetch completion, which queues one more.
    let mut processed = 0;
    for _ in 0..8 {
        if processed == 4 {
            break;
        }
        processed += queue.process_pending_timeout(Duration::from_secs(5)).unwrap();
    }
    assert_eq!(processed, 4);

    let names: Vec<&str> = rx.try_iter().collect();
    assert_eq!(names, vec!["targeted", "file_dropped", "file_urls_loaded"]);
    assert_eq!(store.state().result, Some(Ok(vec![url])));
}

#[test]
fn test_policy_rejection_never_fetches() {
    setup();
    let queue = MainQueue::new();
    let mut zone = DropZone::new(
        DropZoneConfig::default().with_allow_multiple(false),
        pool(),
        queue.clone(),
    )
    .unwrap();

    let items: Vec<SharedItemProvider> = (0..3)
        .map(|_| Arc::new(FailingProvider) as SharedItemProvider)
        .collect();
    assert!(!zone.on_drop(items));

    assert_eq!(queue.process_pending_timeout(Duration::from_millis(100)).unwrap(), 0);
    let state = zone.state();
    assert_eq!(state.alert.map(|a| a.title), Some("Error".to_string()));
    assert!(state.result.is_none());
}
