//! Keyboard dispatch.
//!
//! Selection cursors live in `App`; the menu's visibility lives in the menu
//! controller and is only changed through it. Feed loads triggered here are
//! spawned, never awaited, so the loop keeps consuming input while a
//! conversion request is in flight.

use crate::app::{App, AppEvent};
use crate::util::validate_url;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::Action;

pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(Action::Quit);
    }

    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),

        // Menu icon: toggle visibility
        KeyCode::Char('m') | KeyCode::Tab => {
            app.menu.toggle();
        }

        KeyCode::Esc => {
            if !app.menu.visibility().is_hidden() {
                app.menu.hide();
            }
        }

        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),

        KeyCode::Enter => {
            if app.menu.visibility().is_hidden() {
                open_selected_entry(app);
            } else {
                // Menu-item selection: hide the menu, then load
                let index = app.menu.select(app.selected_menu_item)?;
                app.spawn_load(index, event_tx);
            }
        }

        // Reload whatever the view currently shows
        KeyCode::Char('r') => {
            let index = app.current_feed;
            app.spawn_load(index, event_tx);
        }

        _ => {}
    }

    Ok(Action::Continue)
}

/// Moves the active cursor: the menu cursor while the menu is shown, the
/// entry cursor otherwise. Saturates at list edges.
fn move_cursor(app: &mut App, delta: isize) {
    if app.menu.visibility().is_hidden() {
        let len = app.surface.entry_count();
        app.selected_entry = step(app.selected_entry, delta, len);
    } else {
        let len = app.surface.menu_items().len();
        app.selected_menu_item = step(app.selected_menu_item, delta, len);
    }
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len - 1;
    if delta < 0 {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize).min(max)
    }
}

/// Opens the selected entry's link in the system browser.
fn open_selected_entry(app: &mut App) {
    let Some(link) = app.surface.entry_link(app.selected_entry) else {
        app.set_status("Entry has no link");
        return;
    };

    match validate_url(&link) {
        Ok(_) => {
            if let Err(e) = open::that_detached(&link) {
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status("Opened in browser");
            }
        }
        Err(e) => app.set_status(format!("Refusing to open link: {}", e)),
    }
}
