//! Client for the feed-to-JSON conversion service.
//!
//! The reader never parses RSS/Atom XML itself. Each load POSTs the feed's
//! source URL to a conversion endpoint and gets back the feed as JSON:
//!
//! ```json
//! { "feed": { "title": "...", "entries": [ { "title": "...", ... } ] } }
//! ```
//!
//! Entries are opaque to the rest of the crate — the loader hands them to
//! the rendering surface without interpreting anything beyond their
//! presence.
//!
//! There is deliberately no retry and no request timeout here: a failed
//! conversion is terminal for that load, and a pending request resolves
//! whenever the transport does. A transport-level timeout can be configured
//! on the [`reqwest::Client`] at construction instead.

use crate::util::{validate_url, UrlValidationError};
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default public conversion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://rsstojson.udacity.com/parseFeed";

/// Response bodies past this size are abandoned mid-stream.
const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Conversion service error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// The response was not the expected JSON shape (including a missing
    /// entry list, which the reader treats the same as a failed fetch).
    #[error("Malformed conversion response: {0}")]
    Malformed(String),
    #[error("Invalid feed source URL: {0}")]
    InvalidSourceUrl(#[from] UrlValidationError),
    /// Conversion endpoints must be HTTPS; plain HTTP is only accepted for
    /// localhost test servers.
    #[error("Insecure conversion endpoint: HTTPS required (except localhost)")]
    InsecureEndpoint,
}

/// One article as returned by the conversion service.
///
/// Only `title` is required; everything else is carried through to the
/// rendering surface if present.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, rename = "publishedDate")]
    pub published_date: Option<String>,
    #[serde(default, rename = "contentSnippet")]
    pub content_snippet: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl FeedEntry {
    /// Parses the service's publication date, which arrives as RFC 2822
    /// text ("Mon, 02 Jan 2006 15:04:05 -0700") with RFC 3339 as a fallback
    /// for self-hosted converters.
    pub fn published(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        let raw = self.published_date.as_deref()?;
        chrono::DateTime::parse_from_rfc2822(raw)
            .or_else(|_| chrono::DateTime::parse_from_rfc3339(raw))
            .ok()
    }
}

/// The converted feed: an optional title plus the entry list.
///
/// `entries` is *not* defaulted — a response without an entry list fails
/// deserialization and surfaces as [`ConvertError::Malformed`].
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertedFeed {
    #[serde(default)]
    pub title: Option<String>,
    pub entries: Vec<FeedEntry>,
}

#[derive(Deserialize)]
struct ParseResponse {
    feed: ConvertedFeed,
}

#[derive(Serialize)]
struct ParseRequest<'a> {
    #[serde(rename = "sourceUrl")]
    source_url: &'a str,
}

/// Handle on one conversion endpoint.
pub struct Converter {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl Converter {
    /// Creates a converter for `endpoint`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InsecureEndpoint`] unless the endpoint is `https://`
    /// or a localhost `http://` URL. The check runs here, once, so the API
    /// key can never be attached to a plaintext remote request later.
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<SecretString>,
    ) -> Result<Self, ConvertError> {
        let endpoint = endpoint.into();
        if !endpoint.starts_with("https://") {
            let is_localhost = endpoint.starts_with("http://127.0.0.1")
                || endpoint.starts_with("http://localhost");
            if !is_localhost {
                tracing::error!(endpoint = %endpoint, "Rejecting non-HTTPS conversion endpoint");
                return Err(ConvertError::InsecureEndpoint);
            }
            tracing::warn!(endpoint = %endpoint, "Using non-HTTPS conversion endpoint (localhost only)");
        }

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Converts the feed at `source_url` to JSON via the remote service.
    ///
    /// Issues exactly one `POST` with body `{"sourceUrl": "<url>"}`. The
    /// source URL is validated first so the proxy is never asked to fetch
    /// local or private addresses.
    pub async fn parse_feed(&self, source_url: &str) -> Result<ConvertedFeed, ConvertError> {
        validate_url(source_url)?;

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ParseRequest { source_url });

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key.expose_secret()));
        }

        let response = request.send().await.map_err(ConvertError::Network)?;

        if !response.status().is_success() {
            return Err(ConvertError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        let parsed: ParseResponse =
            serde_json::from_slice(&bytes).map_err(|e| ConvertError::Malformed(e.to_string()))?;

        tracing::debug!(
            source = %source_url,
            entries = parsed.feed.entries.len(),
            "Feed converted"
        );
        Ok(parsed.feed)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ConvertError> {
    // Fast path: trust Content-Length when the server sends one
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ConvertError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ConvertError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ConvertError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
