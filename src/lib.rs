//! headliner: a terminal RSS reader backed by a feed-to-JSON conversion
//! service.
//!
//! The controller core (catalog, conversion client, loader, menu) is
//! UI-agnostic: it renders through the [`view::ViewSurface`] trait and is
//! exercised headless by the integration tests. The `ui` module supplies
//! the terminal-backed surface and the event loop.

pub mod app;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod loader;
pub mod menu;
pub mod ui;
pub mod util;
pub mod view;
