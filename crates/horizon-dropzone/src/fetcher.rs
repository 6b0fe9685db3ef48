//! Resolves dropped items into file locations.
//!
//! Every (provider, content type) pair is loaded concurrently on the worker
//! pool and joined with a [`CompletionGroup`]. The first extraction error
//! completes the fetch immediately; otherwise the fetch completes once every
//! pair has reported.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use horizon_dropzone_core::logging::targets;
use horizon_dropzone_core::{CompletionGroup, ThreadPool};
use url::Url;

use crate::content_type::ContentType;
use crate::error::{FetchError, UrlDecodeError};
use crate::provider::{ItemProvider, SharedItemProvider};

const PROVIDER_PANICKED: &str = "item provider panicked";

/// The outcome of resolving one drop.
pub type FetchOutcome = Result<Vec<Url>, FetchError>;

/// Load a location from every (provider, accepted type) pair.
///
/// `on_complete` runs exactly once, on whichever worker thread finishes the
/// join, or on the calling thread when there is nothing to load. The order of
/// the returned locations is unspecified.
pub fn fetch_file_urls<F>(
    pool: &ThreadPool,
    providers: Vec<SharedItemProvider>,
    accepted_types: &[ContentType],
    on_complete: F,
) where
    F: FnOnce(FetchOutcome) + Send + 'static,
{
    let pairs: Vec<(SharedItemProvider, ContentType)> = providers
        .iter()
        .flat_map(|provider| {
            accepted_types
                .iter()
                .map(move |ty| (provider.clone(), ty.clone()))
        })
        .collect();

    tracing::debug!(
        target: targets::FETCH,
        providers = providers.len(),
        accepted_types = accepted_types.len(),
        pairs = pairs.len(),
        "fetching file urls"
    );

    let group = CompletionGroup::new(pairs.len(), move |outcome: FetchOutcome| {
        match &outcome {
            Ok(urls) => {
                tracing::debug!(target: targets::FETCH, count = urls.len(), "fetch complete")
            }
            Err(err) => {
                tracing::debug!(target: targets::FETCH, error = %err, "fetch failed")
            }
        }
        on_complete(outcome);
    });

    for (provider, content_type) in pairs {
        let group = group.clone();
        pool.spawn_detached(move || group.report(load_url(provider.as_ref(), &content_type)));
    }
}

/// Load one pair. Undecodable data counts as "no location".
///
/// A provider that panics is reported as an extraction error so the join
/// still completes.
fn load_url(
    provider: &dyn ItemProvider,
    content_type: &ContentType,
) -> Result<Option<Url>, FetchError> {
    let loaded = catch_unwind(AssertUnwindSafe(|| provider.load_data(content_type)))
        .unwrap_or_else(|_| {
            tracing::error!(
                target: targets::FETCH,
                ?provider,
                %content_type,
                "item provider panicked"
            );
            Err(FetchError::new(PROVIDER_PANICKED))
        });
    let Some(bytes) = loaded? else {
        tracing::trace!(target: targets::FETCH, ?provider, %content_type, "no representation");
        return Ok(None);
    };

    match decode_url(&bytes) {
        Ok(url) => Ok(Some(url)),
        Err(err) => {
            tracing::warn!(
                target: targets::FETCH,
                ?provider,
                %content_type,
                error = %err,
                "skipping undecodable location"
            );
            Ok(None)
        }
    }
}

/// Decode a payload into a single location.
///
/// Accepts a URL or a `text/uri-list` document, in which case the first entry
/// is used (`#` lines are comments). A bare absolute path is converted to a
/// `file://` URL.
///
/// ```
/// use horizon_dropzone::decode_url;
///
/// let url = decode_url(b"# dragged\r\nfile:///tmp/a.txt\r\nfile:///tmp/b.txt\r\n").unwrap();
/// assert_eq!(url.as_str(), "file:///tmp/a.txt");
/// ```
pub fn decode_url(bytes: &[u8]) -> Result<Url, UrlDecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let location = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .ok_or(UrlDecodeError::Empty)?;

    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(source) => {
            let path = Path::new(location);
            if path.is_absolute() {
                if let Ok(url) = Url::from_file_path(path) {
                    return Ok(url);
                }
            }
            Err(UrlDecodeError::Invalid {
                location: location.to_string(),
                source,
            })
        }
    }
}
