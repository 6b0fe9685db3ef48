//! Item providers: per-item handles to the data of a drag session.
//!
//! A drop hands the widget one [`ItemProvider`] per dragged item. Providers
//! are asked for data by [`ContentType`] on worker threads, so loading may
//! block.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

use crate::content_type::ContentType;
use crate::error::FetchError;

/// Opaque handle to one dragged item.
pub trait ItemProvider: Send + Sync + fmt::Debug {
    /// The content types this item can be loaded as.
    fn registered_types(&self) -> Vec<ContentType>;

    /// Returns true if the item offers `content_type`.
    fn has_representation(&self, content_type: &ContentType) -> bool {
        self.registered_types().contains(content_type)
    }

    /// Load the item's data for `content_type`.
    ///
    /// Returns `Ok(None)` when the item has no representation of that type.
    fn load_data(&self, content_type: &ContentType) -> Result<Option<Vec<u8>>, FetchError>;
}

/// Shared handle to a provider, as carried by actions.
pub type SharedItemProvider = Arc<dyn ItemProvider>;

/// Provider for a file dropped from the operating system.
///
/// Serves [`ContentType::FILE_URL`] as the `file://` URL of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathItemProvider {
    path: PathBuf,
}

impl PathItemProvider {
    /// Create a provider for a dropped path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The dropped path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wrap each path in a shared provider.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<SharedItemProvider> {
        paths
            .into_iter()
            .map(|path| Arc::new(Self::new(path)) as SharedItemProvider)
            .collect()
    }
}

impl ItemProvider for PathItemProvider {
    fn registered_types(&self) -> Vec<ContentType> {
        vec![ContentType::FILE_URL]
    }

    fn load_data(&self, content_type: &ContentType) -> Result<Option<Vec<u8>>, FetchError> {
        if *content_type != ContentType::FILE_URL {
            return Ok(None);
        }
        let url = Url::from_file_path(&self.path).map_err(|()| {
            FetchError::new(format!(
                "cannot convert '{}' to a file URL",
                self.path.display()
            ))
        })?;
        Ok(Some(url.as_str().as_bytes().to_vec()))
    }
}

/// In-memory provider holding one payload per content type.
///
/// Used for drags that originate inside the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataItemProvider {
    data: BTreeMap<ContentType, Vec<u8>>,
}

impl DataItemProvider {
    /// Create a provider with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider offering a single location as [`ContentType::FILE_URL`].
    pub fn from_url(url: &Url) -> Self {
        Self::new().with_data(ContentType::FILE_URL, url.as_str())
    }

    /// Create a provider offering plain text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with_data(ContentType::PLAIN_TEXT, text.into())
    }

    /// Builder form of [`set_data`](Self::set_data).
    pub fn with_data(mut self, content_type: ContentType, data: impl Into<Vec<u8>>) -> Self {
        self.set_data(content_type, data);
        self
    }

    /// Set the payload for a content type, replacing any previous one.
    pub fn set_data(&mut self, content_type: ContentType, data: impl Into<Vec<u8>>) {
        self.data.insert(content_type, data.into());
    }

    /// Returns true if no payload is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ItemProvider for DataItemProvider {
    fn registered_types(&self) -> Vec<ContentType> {
        self.data.keys().cloned().collect()
    }

    fn load_data(&self, content_type: &ContentType) -> Result<Option<Vec<u8>>, FetchError> {
        Ok(self.data.get(content_type).cloned())
    }
}
