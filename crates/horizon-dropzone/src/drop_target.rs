//! File drops from the operating system.
//!
//! winit reports a drag of several files as one `HoveredFile` event per file,
//! followed by one `DroppedFile` event per file (or `HoveredFileCancelled`).
//! [`FileDropHandler`] folds these into enter/leave/drop events for the whole
//! set of files.
//!
//! ```
//! use std::path::PathBuf;
//! use horizon_dropzone::{DropTargetEvent, FileDropHandler};
//!
//! let mut handler = FileDropHandler::new();
//! assert_eq!(
//!     handler.handle_hovered_file(PathBuf::from("/tmp/a")),
//!     Some(DropTargetEvent::Entered)
//! );
//! assert_eq!(handler.handle_hovered_file(PathBuf::from("/tmp/b")), None);
//! assert_eq!(handler.handle_dropped_file(PathBuf::from("/tmp/a")), None);
//! assert_eq!(
//!     handler.handle_dropped_file(PathBuf::from("/tmp/b")),
//!     Some(DropTargetEvent::Dropped(vec![PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")]))
//! );
//! ```

use std::path::PathBuf;

use horizon_dropzone_core::logging::targets;
use winit::event::WindowEvent;

/// A drag session event for the window as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTargetEvent {
    /// Files started hovering over the window.
    Entered,
    /// The hover ended without a drop.
    Left,
    /// The files were dropped.
    Dropped(Vec<PathBuf>),
}

/// Tracks a file drag from the operating system.
#[derive(Debug, Default)]
pub struct FileDropHandler {
    /// Files currently hovering, in the order reported.
    hovered_files: Vec<PathBuf>,
    /// Files of the current drop received so far.
    dropped_files: Vec<PathBuf>,
}

impl FileDropHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if files are currently hovering over the window.
    pub fn is_hovering(&self) -> bool {
        !self.hovered_files.is_empty()
    }

    /// The files currently hovering.
    pub fn hovered_files(&self) -> &[PathBuf] {
        &self.hovered_files
    }

    /// Feed a winit window event. Unrelated events return `None`.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<DropTargetEvent> {
        match event {
            WindowEvent::HoveredFile(path) => self.handle_hovered_file(path.clone()),
            WindowEvent::DroppedFile(path) => self.handle_dropped_file(path.clone()),
            WindowEvent::HoveredFileCancelled => self.handle_hover_cancelled(),
            _ => None,
        }
    }

    /// Handle one `HoveredFile` event.
    ///
    /// Returns `Entered` for the first file of a hover.
    pub fn handle_hovered_file(&mut self, path: PathBuf) -> Option<DropTargetEvent> {
        let is_first = self.hovered_files.is_empty();
        if !self.hovered_files.contains(&path) {
            self.hovered_files.push(path);
        }
        is_first.then_some(DropTargetEvent::Entered)
    }

    /// Handle one `DroppedFile` event.
    ///
    /// Returns `Dropped` once every hovered file has been dropped. A drop with
    /// no preceding hover is reported immediately.
    pub fn handle_dropped_file(&mut self, path: PathBuf) -> Option<DropTargetEvent> {
        if self.hovered_files.is_empty() {
            tracing::debug!(
                target: targets::DROP_TARGET,
                path = %path.display(),
                "drop without hover"
            );
            return Some(DropTargetEvent::Dropped(vec![path]));
        }

        if !self.hovered_files.contains(&path) {
            // Platform reported a file it never hovered; keep it with the batch.
            self.hovered_files.push(path.clone());
        }
        if !self.dropped_files.contains(&path) {
            self.dropped_files.push(path);
        }

        if self.dropped_files.len() < self.hovered_files.len() {
            return None;
        }

        let files = std::mem::take(&mut self.hovered_files);
        self.reset();
        tracing::debug!(target: targets::DROP_TARGET, count = files.len(), "files dropped");
        Some(DropTargetEvent::Dropped(files))
    }

    /// Handle `HoveredFileCancelled`.
    pub fn handle_hover_cancelled(&mut self) -> Option<DropTargetEvent> {
        if self.is_hovering() {
            self.reset();
            Some(DropTargetEvent::Left)
        } else {
            None
        }
    }

    /// Forget any hover or partial drop in progress.
    pub fn reset(&mut self) {
        self.hovered_files.clear();
        self.dropped_files.clear();
    }
}
