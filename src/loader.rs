//! Feed loading: resolve a catalog index, fetch through the conversion
//! service, and render the result.
//!
//! Every call to [`FeedLoader::load_feed`] resolves exactly once — with a
//! rendered feed, a reported failure, or a superseded verdict — so callers
//! can sequence on the returned future the way the original page sequenced
//! on its completion callback.

use crate::catalog::{CatalogError, FeedCatalog};
use crate::convert::{ConvertError, Converter};
use crate::view::ViewSurface;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How a load finished.
///
/// A fetch or parse failure is an *outcome*, not an `Err`: the failure is
/// contained (nothing rendered, prior entries untouched) and the load still
/// signals completion. Only an invalid catalog index is a hard error.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The feed was fetched and rendered.
    Rendered { index: usize, entries: usize },
    /// A newer load was issued while this one was in flight; its response
    /// was discarded without touching the view.
    Superseded { index: usize },
    /// The fetch or conversion failed; the view was left as it was.
    Failed { index: usize, error: ConvertError },
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, LoadOutcome::Rendered { .. })
    }
}

/// Fetches feeds by catalog index and renders them through the injected
/// surface.
pub struct FeedLoader {
    catalog: Arc<FeedCatalog>,
    converter: Converter,
    surface: Arc<dyn ViewSurface>,
    // Monotonic ticket counter; only the holder of the newest ticket may
    // render. This is what keeps a slow early response from overwriting a
    // later one.
    generation: AtomicU64,
}

impl FeedLoader {
    pub fn new(
        catalog: Arc<FeedCatalog>,
        converter: Converter,
        surface: Arc<dyn ViewSurface>,
    ) -> Self {
        Self {
            catalog,
            converter,
            surface,
            generation: AtomicU64::new(0),
        }
    }

    /// Loads and renders the feed at `index`.
    ///
    /// On success the surface receives, in order: the feed's display name as
    /// the new title, a clear of all previous entries, then one append per
    /// entry in response order. On fetch failure nothing is rendered and the
    /// previously rendered entries stay on screen; the error comes back in
    /// the [`LoadOutcome`] for the caller to surface (or ignore).
    ///
    /// # Errors
    ///
    /// [`CatalogError::FeedNotFound`] when `index` is outside the catalog.
    /// The check runs before any request is issued and before the fencing
    /// counter moves, so a bad index has no side effects at all.
    pub async fn load_feed(&self, index: usize) -> Result<LoadOutcome, CatalogError> {
        let feed = self.catalog.get(index)?;
        let name = Arc::clone(&feed.name);
        let source_url = Arc::clone(&feed.source_url);

        let ticket = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(feed = %name, index, "Loading feed");

        let result = self.converter.parse_feed(&source_url).await;

        if self.generation.load(Ordering::Acquire) != ticket {
            tracing::debug!(feed = %name, index, "Discarding stale feed response");
            return Ok(LoadOutcome::Superseded { index });
        }

        match result {
            Ok(converted) => {
                self.surface.set_title(&name);
                self.surface.clear_entries();
                for entry in &converted.entries {
                    self.surface.append_entry(entry);
                }
                tracing::info!(feed = %name, entries = converted.entries.len(), "Feed rendered");
                Ok(LoadOutcome::Rendered {
                    index,
                    entries: converted.entries.len(),
                })
            }
            Err(error) => {
                tracing::warn!(feed = %name, error = %error, "Feed load failed");
                Ok(LoadOutcome::Failed { index, error })
            }
        }
    }
}
