//! Actions accepted by the drop-zone reducer.

use crate::fetcher::FetchOutcome;
use crate::provider::SharedItemProvider;

/// Events a drop zone reacts to.
#[derive(Debug, Clone)]
pub enum DropZoneAction {
    /// Items were dropped and accepted.
    FileDropped(Vec<SharedItemProvider>),
    /// A drag entered (`true`) or left (`false`) the zone.
    Targeted(bool),
    /// Several items were dropped while only one is allowed.
    MultipleFilesNotAllowed,
    /// The alert's dismiss button was pressed.
    AlertDismissed,
    /// The fetch started by a drop completed.
    FileUrlsLoaded(FetchOutcome),
}

impl DropZoneAction {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FileDropped(_) => "file_dropped",
            Self::Targeted(_) => "targeted",
            Self::MultipleFilesNotAllowed => "multiple_files_not_allowed",
            Self::AlertDismissed => "alert_dismissed",
            Self::FileUrlsLoaded(_) => "file_urls_loaded",
        }
    }
}
