//! Content type identifiers for dropped payloads.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a kind of payload a dropped item can offer, as a MIME type.
///
/// ```
/// use horizon_dropzone::ContentType;
///
/// assert_eq!(ContentType::FILE_URL.as_str(), "text/uri-list");
/// assert_eq!(ContentType::new("text/plain"), ContentType::PLAIN_TEXT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(Cow<'static, str>);

impl ContentType {
    /// A list of file locations. The default accepted type.
    pub const FILE_URL: Self = Self(Cow::Borrowed("text/uri-list"));
    /// Plain UTF-8 text.
    pub const PLAIN_TEXT: Self = Self(Cow::Borrowed("text/plain"));
    /// HTML markup.
    pub const HTML: Self = Self(Cow::Borrowed("text/html"));

    /// Create a content type from a MIME string.
    pub fn new(mime: impl Into<String>) -> Self {
        Self(Cow::Owned(mime.into()))
    }

    /// The MIME string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentType {
    fn from(mime: &str) -> Self {
        Self::new(mime)
    }
}

impl From<String> for ContentType {
    fn from(mime: String) -> Self {
        Self::new(mime)
    }
}

/// Remove repeated content types, keeping the first occurrence of each.
pub(crate) fn dedup_ordered(types: impl IntoIterator<Item = ContentType>) -> Vec<ContentType> {
    let mut unique: Vec<ContentType> = Vec::new();
    for ty in types {
        if !unique.contains(&ty) {
            unique.push(ty);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrowed_and_owned_compare_equal() {
        assert_eq!(ContentType::from("text/html"), ContentType::HTML);
        assert_eq!(ContentType::FILE_URL.to_string(), "text/uri-list");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let types = dedup_ordered([
            ContentType::HTML,
            ContentType::FILE_URL,
            ContentType::new("text/html"),
            ContentType::PLAIN_TEXT,
        ]);
        assert_eq!(types, vec![ContentType::HTML, ContentType::FILE_URL, ContentType::PLAIN_TEXT]);
    }
}
