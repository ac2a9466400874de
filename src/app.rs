//! Application state and composition.
//!
//! `App` wires the pieces together: the validated catalog, the conversion
//! client, the loader, the menu controller, and the shared terminal surface
//! the UI renders from. Feed loads run as spawned tasks and report back
//! through the [`AppEvent`] channel so the UI thread never blocks on the
//! network.

use crate::catalog::{CatalogError, FeedCatalog};
use crate::config::Config;
use crate::convert::Converter;
use crate::loader::{FeedLoader, LoadOutcome};
use crate::menu::MenuController;
use crate::ui::TerminalSurface;
use anyhow::{Context, Result};
use reqwest::redirect::Policy;
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// How long a status-line message stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Events delivered from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A spawned feed load resolved (success, failure, or superseded).
    LoadFinished(Result<LoadOutcome, CatalogError>),
}

/// Create a redirect policy with loop detection and limited hops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Build the HTTP client used for conversion requests.
///
/// `request_timeout_secs = 0` leaves the client without a timeout: a pending
/// conversion then resolves whenever the transport does, which is the stock
/// behavior.
fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("headliner/", env!("CARGO_PKG_VERSION")))
        .redirect(create_redirect_policy());

    if config.request_timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
    }

    builder.build().context("Failed to build HTTP client")
}

/// The API key from the environment wins over the config file.
fn resolve_api_key(config: &Config) -> Option<SecretString> {
    std::env::var("HEADLINER_API_KEY")
        .ok()
        .or_else(|| config.api_key.clone())
        .map(SecretString::from)
}

/// Top-level application state.
pub struct App {
    pub catalog: Arc<FeedCatalog>,
    pub loader: Arc<FeedLoader>,
    pub menu: MenuController,
    /// Concrete handle on the shared surface for render-side reads; the
    /// loader and menu hold it as `Arc<dyn ViewSurface>`.
    pub surface: Arc<TerminalSurface>,

    /// Cursor into the menu list.
    pub selected_menu_item: usize,
    /// Cursor into the rendered entry list.
    pub selected_entry: usize,
    /// Catalog index of the feed the view currently shows.
    pub current_feed: usize,
    /// Catalog index currently being loaded, if any.
    pub loading: Option<usize>,
    /// Transient status-line message with its creation time.
    pub status: Option<(String, Instant)>,
    pub needs_redraw: bool,
}

impl App {
    /// Builds the application from configuration.
    ///
    /// Catalog validation happens here, so a config with a blank feed name
    /// or a bogus URL fails at startup rather than at first selection.
    pub fn new(config: &Config) -> Result<Self> {
        let catalog = Arc::new(
            FeedCatalog::new(
                config
                    .feeds
                    .iter()
                    .map(|f| (f.name.as_str(), f.url.as_str())),
            )
            .context("Invalid feed catalog")?,
        );

        let client = build_http_client(config)?;
        let converter = Converter::new(client, config.endpoint.clone(), resolve_api_key(config))
            .context("Invalid conversion endpoint")?;

        let surface = Arc::new(TerminalSurface::new());
        let loader = Arc::new(FeedLoader::new(
            Arc::clone(&catalog),
            converter,
            surface.clone(),
        ));
        let menu = MenuController::new(Arc::clone(&catalog), surface.clone());

        Ok(Self {
            catalog,
            loader,
            menu,
            surface,
            selected_menu_item: 0,
            selected_entry: 0,
            current_feed: 0,
            loading: None,
            status: None,
            needs_redraw: true,
        })
    }

    /// Boot sequence: build the menu, then kick off a load of catalog
    /// index 0. Input wiring happens in `ui::run`.
    pub fn boot(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.menu.build();
        self.spawn_load(0, event_tx);
    }

    /// Starts a background load of `index` and records it as in flight.
    pub fn spawn_load(&mut self, index: usize, event_tx: &mpsc::Sender<AppEvent>) {
        self.loading = Some(index);
        let loader = Arc::clone(&self.loader);
        let tx = event_tx.clone();
        tokio::spawn(async move {
            let result = loader.load_feed(index).await;
            // Receiver gone means the UI is shutting down
            let _ = tx.send(AppEvent::LoadFinished(result)).await;
        });
    }

    /// Applies a background event to application state.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoadFinished(Ok(LoadOutcome::Rendered { index, entries })) => {
                if self.loading == Some(index) {
                    self.loading = None;
                }
                self.current_feed = index;
                self.selected_entry = 0;
                self.set_status(format!("Loaded {} entries", entries));
            }
            AppEvent::LoadFinished(Ok(LoadOutcome::Superseded { index })) => {
                // A newer load owns the view now; nothing to update
                tracing::debug!(index, "Load superseded");
            }
            AppEvent::LoadFinished(Ok(LoadOutcome::Failed { index, error })) => {
                if self.loading == Some(index) {
                    self.loading = None;
                }
                // The failure is contained; surface it without disturbing
                // whatever is currently rendered
                self.set_status(format!("Load failed: {}", error));
            }
            AppEvent::LoadFinished(Err(e)) => {
                self.loading = None;
                self.set_status(format!("Error: {}", e));
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clears an expired status message. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, created)) = &self.status {
            if created.elapsed() > STATUS_TTL {
                self.status = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfigEntry;

    fn test_config() -> Config {
        Config {
            endpoint: "http://127.0.0.1:1/parseFeed".into(),
            feeds: vec![FeedConfigEntry {
                name: "Example".into(),
                url: "https://example.com/feed".into(),
            }],
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_app_builds_from_valid_config() {
        let app = App::new(&test_config()).unwrap();
        assert_eq!(app.catalog.len(), 1);
        assert!(app.loading.is_none());
        assert!(app.menu.visibility().is_hidden());
    }

    #[tokio::test]
    async fn test_app_rejects_blank_feed_name() {
        let mut config = test_config();
        config.feeds[0].name = "".into();
        assert!(App::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_app_rejects_insecure_endpoint() {
        let mut config = test_config();
        config.endpoint = "http://convert.example.com/parseFeed".into();
        assert!(App::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_status_expires() {
        tokio::time::pause();
        let mut app = App::new(&test_config()).unwrap();
        app.set_status("hello");
        assert!(!app.clear_expired_status());
        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(app.clear_expired_status());
        assert!(app.status.is_none());
    }
}
