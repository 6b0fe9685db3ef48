//! The drop-zone state machine.

use crate::action::DropZoneAction;
use crate::content_type::ContentType;
use crate::provider::SharedItemProvider;
use crate::state::{AlertState, DropZoneState};

/// Side effect requested by a transition, run by the store.
#[derive(Debug, Clone, Default)]
pub enum Effect {
    /// Nothing to run.
    #[default]
    None,
    /// Resolve the dropped items, then dispatch
    /// [`DropZoneAction::FileUrlsLoaded`].
    FetchFileUrls {
        providers: Vec<SharedItemProvider>,
        accepted_types: Vec<ContentType>,
    },
}

impl Effect {
    /// Returns true if there is nothing to run.
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}

/// Apply `action` to `state` and return the effect to run.
///
/// Pure: performs no I/O and touches nothing but `state`.
pub fn reduce(state: &mut DropZoneState, action: DropZoneAction) -> Effect {
    match action {
        DropZoneAction::FileDropped(providers) => {
            return Effect::FetchFileUrls {
                providers,
                accepted_types: state.accepted_types.clone(),
            };
        }
        DropZoneAction::Targeted(targeted) => state.targeted = targeted,
        DropZoneAction::MultipleFilesNotAllowed => {
            state.alert = Some(AlertState::multiple_files_not_allowed());
        }
        DropZoneAction::AlertDismissed => state.alert = None,
        DropZoneAction::FileUrlsLoaded(outcome) => state.result = Some(outcome),
    }
    Effect::None
}
