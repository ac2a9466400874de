//! The rendering boundary.
//!
//! The loader and menu controller never touch the terminal directly; they
//! talk to a [`ViewSurface`] injected at construction. The production
//! implementation is [`crate::ui::TerminalSurface`]; tests substitute
//! recording implementations so the controller logic runs without a
//! terminal.

use crate::catalog::FeedDescriptor;
use crate::convert::FeedEntry;

/// Everything the controller core needs from a display.
///
/// Methods take `&self`: calls arrive from spawned load tasks as well as the
/// UI thread, so implementations use interior mutability.
pub trait ViewSurface: Send + Sync {
    /// Replaces the header title with the current feed's display name.
    fn set_title(&self, title: &str);

    /// Removes every previously rendered entry.
    fn clear_entries(&self);

    /// Renders one entry, appended after those already shown.
    fn append_entry(&self, entry: &FeedEntry);

    /// Renders one menu item. Called once per descriptor, in catalog order,
    /// during boot.
    fn add_menu_item(&self, feed: &FeedDescriptor);

    /// Shows or hides the feed-selection menu.
    fn set_menu_visible(&self, visible: bool);
}
