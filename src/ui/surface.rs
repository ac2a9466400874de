//! The terminal-backed [`ViewSurface`] implementation.
//!
//! Loader tasks write into this state from their own tasks while the render
//! loop reads it, so every field sits behind interior mutability. Lock
//! poisoning is recovered rather than propagated: a panicked writer leaves
//! at worst a half-updated frame, which the next render overwrites.

use crate::catalog::FeedDescriptor;
use crate::convert::FeedEntry;
use crate::view::ViewSurface;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One rendered menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub index: usize,
    pub name: String,
}

/// Shared view state: what is currently on screen.
pub struct TerminalSurface {
    title: Mutex<String>,
    entries: Mutex<Vec<FeedEntry>>,
    menu_items: Mutex<Vec<MenuItem>>,
    menu_visible: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            title: Mutex::new(String::new()),
            entries: Mutex::new(Vec::new()),
            menu_items: Mutex::new(Vec::new()),
            menu_visible: AtomicBool::new(false),
        }
    }

    pub fn title(&self) -> String {
        lock(&self.title).clone()
    }

    /// Read access to the rendered entries for the current frame.
    pub fn entries(&self) -> MutexGuard<'_, Vec<FeedEntry>> {
        lock(&self.entries)
    }

    pub fn entry_count(&self) -> usize {
        lock(&self.entries).len()
    }

    /// The link of the entry at `index`, if both exist.
    pub fn entry_link(&self, index: usize) -> Option<String> {
        lock(&self.entries).get(index).and_then(|e| e.link.clone())
    }

    pub fn menu_items(&self) -> MutexGuard<'_, Vec<MenuItem>> {
        lock(&self.menu_items)
    }

    pub fn menu_visible(&self) -> bool {
        self.menu_visible.load(Ordering::Acquire)
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSurface for TerminalSurface {
    fn set_title(&self, title: &str) {
        *lock(&self.title) = title.to_string();
    }

    fn clear_entries(&self) {
        lock(&self.entries).clear();
    }

    fn append_entry(&self, entry: &FeedEntry) {
        lock(&self.entries).push(entry.clone());
    }

    fn add_menu_item(&self, feed: &FeedDescriptor) {
        lock(&self.menu_items).push(MenuItem {
            index: feed.catalog_index,
            name: feed.name.to_string(),
        });
    }

    fn set_menu_visible(&self, visible: bool) {
        self.menu_visible.store(visible, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, link: Option<&str>) -> FeedEntry {
        FeedEntry {
            title: title.into(),
            link: link.map(String::from),
            author: None,
            published_date: None,
            content_snippet: None,
            content: None,
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_starts_blank_with_menu_hidden() {
        let surface = TerminalSurface::new();
        assert_eq!(surface.title(), "");
        assert_eq!(surface.entry_count(), 0);
        assert!(!surface.menu_visible());
    }

    #[test]
    fn test_append_and_clear_entries() {
        let surface = TerminalSurface::new();
        surface.append_entry(&entry("One", Some("https://example.com/1")));
        surface.append_entry(&entry("Two", None));
        assert_eq!(surface.entry_count(), 2);
        assert_eq!(
            surface.entry_link(0).as_deref(),
            Some("https://example.com/1")
        );
        assert_eq!(surface.entry_link(1), None);
        assert_eq!(surface.entry_link(9), None);

        surface.clear_entries();
        assert_eq!(surface.entry_count(), 0);
    }

    #[test]
    fn test_menu_visibility_roundtrip() {
        let surface = TerminalSurface::new();
        surface.set_menu_visible(true);
        assert!(surface.menu_visible());
        surface.set_menu_visible(false);
        assert!(!surface.menu_visible());
    }
}
