//! The UI renders the view's copy of the list into something visible.
//!
//! Only [`SessionView::items`](crate::app_state::SessionView) is drawn, so what appears on
//! screen is exactly what the delivered edit scripts built.

use crate::app_state::{AppState, Item, MoveState};
use crate::node::Node;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the list and the help bar.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .view
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| ListItem::new(item_line(item)).style(item_style(app, i, item)))
        .collect();

    let mode = if app.adapter.sections().is_some() {
        "Sections"
    } else {
        "Nodes"
    };
    let title = match app.move_state {
        MoveState::None => format!("{mode} ({} items)", app.view.items.len()),
        MoveState::Selected | MoveState::Moved => format!("{mode} (MOVING)"),
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    let help = if let Some(ref msg) = app.message {
        msg.clone()
    } else if app.move_state == MoveState::None {
        "↑/↓: Navigate | Ctrl+↑/↓: Drag | Space: Collapse | h/l: Nudge | H/L: Swipe | q: Quit"
            .to_string()
    } else {
        "Ctrl+↑/↓: Drag | Enter/Esc: Drop".to_string()
    };
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, chunks[1]);
}

fn item_line(item: &Item) -> Line<'static> {
    match item {
        Item::Section { header, collapsed } => {
            let marker = if *collapsed { "▸ " } else { "▾ " };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    header.title.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        }
        Item::Node { node } => Line::from(vec![Span::raw("    "), Span::raw(node.title.clone())]),
    }
}

fn item_style(app: &AppState, index: usize, item: &Item) -> Style {
    let moving = app.moving_key.as_deref() == Some(item.key());
    match (moving, &app.move_state) {
        (true, MoveState::Selected) => Style::default()
            .fg(Color::Rgb(255, 165, 0)) // Orange
            .add_modifier(Modifier::BOLD),
        (true, MoveState::Moved) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        _ if index == app.cursor => Style::default().add_modifier(Modifier::REVERSED),
        _ => Style::default(),
    }
}
