//! The feed catalog: the fixed, ordered list of feed sources the reader can
//! display.
//!
//! The catalog is built once at startup (from configuration or the stock
//! defaults) and never mutated afterward. Every descriptor gets its position
//! assigned as a stable index at construction; the menu, the loader, and the
//! UI all address feeds by that index.

use crate::util::{validate_url, UrlValidationError};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while building or addressing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog must contain at least one feed.
    #[error("Feed catalog is empty")]
    Empty,
    /// A feed entry had a blank display name.
    #[error("Feed at position {0} has an empty name")]
    BlankName(usize),
    /// A feed entry had a blank source URL.
    #[error("Feed '{0}' has an empty source URL")]
    BlankUrl(String),
    /// A feed entry's source URL failed validation.
    #[error("Feed '{name}' has an invalid source URL: {source}")]
    InvalidUrl {
        name: String,
        #[source]
        source: UrlValidationError,
    },
    /// A feed was addressed by an index outside the catalog.
    #[error("No feed at catalog index {index} (catalog holds {len})")]
    FeedNotFound { index: usize, len: usize },
}

/// One catalog entry: a display name, a source URL, and the position the
/// entry was assigned at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDescriptor {
    pub name: Arc<str>,
    pub source_url: Arc<str>,
    /// Position within the catalog. Contiguous from 0, assigned once.
    pub catalog_index: usize,
}

/// The ordered, immutable set of available feeds.
#[derive(Debug)]
pub struct FeedCatalog {
    feeds: Vec<FeedDescriptor>,
}

impl FeedCatalog {
    /// Builds a catalog from `(name, url)` pairs, assigning indices in input
    /// order.
    ///
    /// # Errors
    ///
    /// Rejects an empty input, blank names, blank URLs, and URLs that fail
    /// [`validate_url`] (non-http(s) schemes, localhost, private ranges).
    /// Validation happens here so every later fetch can trust the catalog.
    pub fn new<N, U>(entries: impl IntoIterator<Item = (N, U)>) -> Result<Self, CatalogError>
    where
        N: AsRef<str>,
        U: AsRef<str>,
    {
        let mut feeds = Vec::new();
        for (position, (name, url)) in entries.into_iter().enumerate() {
            let name = name.as_ref().trim();
            let url = url.as_ref().trim();
            if name.is_empty() {
                return Err(CatalogError::BlankName(position));
            }
            if url.is_empty() {
                return Err(CatalogError::BlankUrl(name.to_owned()));
            }
            validate_url(url).map_err(|source| CatalogError::InvalidUrl {
                name: name.to_owned(),
                source,
            })?;
            feeds.push(FeedDescriptor {
                name: Arc::from(name),
                source_url: Arc::from(url),
                catalog_index: position,
            });
        }

        if feeds.is_empty() {
            return Err(CatalogError::Empty);
        }

        tracing::debug!(feeds = feeds.len(), "Feed catalog built");
        Ok(Self { feeds })
    }

    /// Looks up a descriptor by catalog index.
    ///
    /// # Errors
    ///
    /// [`CatalogError::FeedNotFound`] when the index is out of range.
    pub fn get(&self, index: usize) -> Result<&FeedDescriptor, CatalogError> {
        self.feeds.get(index).ok_or(CatalogError::FeedNotFound {
            index,
            len: self.feeds.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Iterates descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &FeedDescriptor> {
        self.feeds.iter()
    }
}
