//! Error types for the drop-zone widget.

use horizon_dropzone_core::CoreError;
use thiserror::Error;

/// Errors raised while building or configuring a drop zone.
#[derive(Error, Debug)]
pub enum DropZoneError {
    /// The configuration is well-formed but not usable.
    #[error("invalid drop zone configuration: {0}")]
    InvalidConfig(String),

    /// The configuration text could not be parsed.
    #[error("failed to parse drop zone configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize drop zone configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A core runtime operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for drop-zone operations.
pub type DropZoneResult<T> = Result<T, DropZoneError>;

/// Failure to extract data from a dropped item.
///
/// Carries the description reported by the item provider. Two errors are
/// equal when their descriptions are equal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("{description}")]
pub struct FetchError {
    description: String,
}

impl FetchError {
    /// Create an error with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// The human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Reasons a payload could not be decoded into a file location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlDecodeError {
    #[error("payload is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),

    #[error("payload contains no location")]
    Empty,

    #[error("invalid location {location:?}: {source}")]
    Invalid {
        location: String,
        #[source]
        source: url::ParseError,
    },
}
