//! The feed-selection menu.
//!
//! Visibility is a two-state machine owned here and *pushed* to the
//! rendering surface; nothing else in the crate decides whether the menu is
//! on screen. The menu starts hidden on every run, toggles from the menu
//! key, and is forced hidden whenever a feed is selected.

use crate::catalog::{CatalogError, FeedCatalog};
use crate::view::ViewSurface;
use std::sync::Arc;

/// Whether the feed-selection menu is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuVisibility {
    Hidden,
    Shown,
}

impl MenuVisibility {
    pub fn toggled(self) -> Self {
        match self {
            MenuVisibility::Hidden => MenuVisibility::Shown,
            MenuVisibility::Shown => MenuVisibility::Hidden,
        }
    }

    pub fn is_hidden(self) -> bool {
        matches!(self, MenuVisibility::Hidden)
    }
}

/// Owns menu state and the menu's slice of the rendering surface.
pub struct MenuController {
    catalog: Arc<FeedCatalog>,
    surface: Arc<dyn ViewSurface>,
    visibility: MenuVisibility,
}

impl MenuController {
    /// Creates a controller with the menu hidden.
    pub fn new(catalog: Arc<FeedCatalog>, surface: Arc<dyn ViewSurface>) -> Self {
        Self {
            catalog,
            surface,
            visibility: MenuVisibility::Hidden,
        }
    }

    /// Renders one menu item per catalog entry, in catalog order. Called
    /// once during boot.
    pub fn build(&self) {
        for feed in self.catalog.iter() {
            self.surface.add_menu_item(feed);
        }
        tracing::debug!(items = self.catalog.len(), "Menu built");
    }

    /// Flips visibility and pushes the new state to the surface.
    pub fn toggle(&mut self) -> MenuVisibility {
        self.visibility = self.visibility.toggled();
        self.surface
            .set_menu_visible(!self.visibility.is_hidden());
        self.visibility
    }

    /// Forces the menu hidden regardless of current state.
    pub fn hide(&mut self) {
        self.visibility = MenuVisibility::Hidden;
        self.surface.set_menu_visible(false);
    }

    /// Handles a menu-item selection: validates the index, forces the menu
    /// hidden, and returns the index for the caller to load.
    ///
    /// # Errors
    ///
    /// [`CatalogError::FeedNotFound`] for an out-of-range index; visibility
    /// is left unchanged in that case.
    pub fn select(&mut self, index: usize) -> Result<usize, CatalogError> {
        self.catalog.get(index)?;
        self.hide();
        Ok(index)
    }

    pub fn visibility(&self) -> MenuVisibility {
        self.visibility
    }
}
