//! Frame layout and widgets.
//!
//! Reads the shared surface state and the cursors in `App`. Feed-sourced
//! strings pass through `sanitize_line` before they reach the terminal.

use crate::app::App;
use crate::convert::FeedEntry;
use crate::util::{sanitize_line, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render one full frame.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header title
            Constraint::Min(1),    // entries (and menu overlay)
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    if app.surface.menu_visible() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1]);
        render_menu(f, app, columns[0]);
        render_entries(f, app, columns[1]);
    } else {
        render_entries(f, app, chunks[1]);
    }

    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = app.surface.title();
    let text = if title.is_empty() {
        "headliner".to_string()
    } else {
        sanitize_line(&title).into_owned()
    };

    let header = Paragraph::new(Line::from(Span::styled(
        truncate_to_width(&text, area.width.saturating_sub(2) as usize).into_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_menu(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .surface
        .menu_items()
        .iter()
        .map(|item| {
            let style = if item.index == app.selected_menu_item {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                sanitize_line(&item.name).into_owned(),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Feeds"),
    );
    f.render_widget(list, area);
}

fn render_entries(f: &mut Frame, app: &App, area: Rect) {
    let entries = app.surface.entries();
    let width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = if entries.is_empty() {
        let placeholder = if app.loading.is_some() {
            "Loading entries..."
        } else {
            "No entries"
        };
        vec![ListItem::new(placeholder)]
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| entry_item(entry, i == app.selected_entry, width))
            .collect()
    };

    let title = format!("Entries ({})", entries.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

/// One entry row: the title, then a dim detail line with date and snippet.
fn entry_item(entry: &FeedEntry, selected: bool, width: usize) -> ListItem<'static> {
    let title_style = if selected {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let title = truncate_to_width(&sanitize_line(&entry.title), width).into_owned();
    let mut lines = vec![Line::from(Span::styled(title, title_style))];

    let mut detail = String::new();
    if let Some(published) = entry.published() {
        detail.push_str(&published.format("%b %d, %Y").to_string());
    }
    if let Some(snippet) = &entry.content_snippet {
        if !detail.is_empty() {
            detail.push_str("  ");
        }
        detail.push_str(&sanitize_line(snippet));
    }
    if !detail.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&detail, width).into_owned(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(lines)
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some((message, _)) = &app.status {
        message.clone()
    } else if let Some(index) = app.loading {
        let name = app
            .catalog
            .get(index)
            .map(|feed| feed.name.to_string())
            .unwrap_or_default();
        format!("Loading {}...", name)
    } else {
        "m menu · j/k move · Enter select/open · r reload · q quit".to_string()
    };

    let status = Paragraph::new(Line::from(Span::styled(
        truncate_to_width(&text, area.width as usize).into_owned(),
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(status, area);
}
