//! A reusable file-drop widget.
//!
//! The user drags one or more files onto a [`DropZone`]. The zone checks the
//! drop against its allow-multiple-files policy, resolves every dropped item
//! into a file location on a worker pool, and then shows either an alert or a
//! result view.
//!
//! State lives in a [`Store`] and changes only through [`reduce`]:
//!
//! ```text
//! window event ─► DropZone ─► Store::send(action) ─► reduce(state, action) ─► Effect
//!                                   ▲                                            │
//!                                   └── MainQueue ◄── fetch_file_urls (pool) ◄───┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_dropzone::{DataItemProvider, DropZone, DropZoneConfig, SharedItemProvider};
//! use horizon_dropzone_core::MainQueue;
//! use url::Url;
//!
//! let queue = MainQueue::new();
//! let mut zone = DropZone::with_global_pool(DropZoneConfig::default(), queue.clone()).unwrap();
//!
//! let url = Url::parse("file:///tmp/report.pdf").unwrap();
//! let item: SharedItemProvider = Arc::new(DataItemProvider::from_url(&url));
//! assert!(zone.on_drop(vec![item]));
//!
//! queue.process_pending_timeout(Duration::from_secs(5)).unwrap();
//! assert_eq!(zone.state().result, Some(Ok(vec![url])));
//! ```

mod action;
mod config;
mod content_type;
mod drop_target;
mod error;
mod fetcher;
mod provider;
mod reducer;
mod state;
mod store;
mod view;

pub use action::DropZoneAction;
pub use config::{DEFAULT_HINT, DropZoneConfig, DropZoneStyle};
pub use content_type::ContentType;
pub use drop_target::{DropTargetEvent, FileDropHandler};
pub use error::{DropZoneError, DropZoneResult, FetchError, UrlDecodeError};
pub use fetcher::{FetchOutcome, decode_url, fetch_file_urls};
pub use provider::{DataItemProvider, ItemProvider, PathItemProvider, SharedItemProvider};
pub use reducer::{Effect, reduce};
pub use state::{AlertAction, AlertButton, AlertState, DropZoneState};
pub use store::Store;
pub use view::{DropZone, NoResultView, ResultView, UrlListView, display_name, paint_drop_target};
