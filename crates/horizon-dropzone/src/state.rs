//! Widget state.

use crate::config::DropZoneConfig;
use crate::content_type::{ContentType, dedup_ordered};
use crate::fetcher::FetchOutcome;

/// What a dismiss button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertAction {
    /// Close the alert.
    Dismiss,
}

/// The single button of an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertButton {
    pub label: String,
    pub action: AlertAction,
}

/// A modal message shown over the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub title: String,
    pub message: String,
    pub button: AlertButton,
}

impl AlertState {
    /// Create an alert with an "OK" dismiss button.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            button: AlertButton {
                label: "OK".to_string(),
                action: AlertAction::Dismiss,
            },
        }
    }

    /// The alert shown when several files are dropped but only one is allowed.
    pub fn multiple_files_not_allowed() -> Self {
        Self::new("Error", "Multiple files not allowed.")
    }
}

/// State of one drop zone.
///
/// Only the reducer mutates it; views read snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct DropZoneState {
    /// A drag is hovering over the zone.
    pub targeted: bool,
    /// Alert currently shown, if any.
    pub alert: Option<AlertState>,
    /// Whether more than one item may be dropped at once.
    pub allow_multiple: bool,
    /// Text shown inside the empty zone.
    pub hint: String,
    /// Content types requested from each dropped item, in order.
    pub accepted_types: Vec<ContentType>,
    /// Outcome of the last completed fetch.
    pub result: Option<FetchOutcome>,
}

impl DropZoneState {
    /// Initial state for a configuration.
    pub fn from_config(config: &DropZoneConfig) -> Self {
        Self {
            targeted: false,
            alert: None,
            allow_multiple: config.allow_multiple,
            hint: config.hint.clone(),
            accepted_types: dedup_ordered(config.accepted_types.iter().cloned()),
            result: None,
        }
    }
}

impl Default for DropZoneState {
    fn default() -> Self {
        Self::from_config(&DropZoneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = DropZoneState::default();
        assert!(!state.targeted);
        assert!(state.allow_multiple);
        assert_eq!(state.hint, "Drop files here.");
        assert_eq!(state.accepted_types, vec![ContentType::FILE_URL]);
        assert!(state.alert.is_none());
        assert!(state.result.is_none());
    }

    #[test]
    fn test_from_config_dedups_types() {
        let config = DropZoneConfig::default().with_accepted_types([
            ContentType::FILE_URL,
            ContentType::PLAIN_TEXT,
            ContentType::FILE_URL,
        ]);
        let state = DropZoneState::from_config(&config);
        assert_eq!(state.accepted_types, vec![ContentType::FILE_URL, ContentType::PLAIN_TEXT]);
    }

    #[test]
    fn test_policy_alert() {
        let alert = AlertState::multiple_files_not_allowed();
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, "Multiple files not allowed.");
        assert_eq!(alert.button.label, "OK");
        assert_eq!(alert.button.action, AlertAction::Dismiss);
    }
}
