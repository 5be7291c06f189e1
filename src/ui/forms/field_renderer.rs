//! Field rendering utilities for forms

use crate::state::{FieldDefinition, FieldKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field (top border + value + bottom border)
pub const FIELD_HEIGHT: u16 = 3;

/// Draw one form field.
///
/// The validation error, if any, goes in the bottom border so an invalid
/// field takes no extra rows.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDefinition,
    value: &str,
    is_active: bool,
    error: Option<&str>,
) {
    let accent = match (error.is_some(), is_active) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };

    let value_line = match field.kind {
        FieldKind::Choice(_) => choice_line(value, is_active),
        _ => text_line(value, is_active),
    };

    let mut block = Block::default()
        .title(format!(" {} ", field.display_label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(value_line).block(block), area);
}

fn text_line(value: &str, is_active: bool) -> Line<'_> {
    if value.is_empty() && !is_active {
        return Line::from(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
    }
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let cursor = if is_active { "▌" } else { "" };
    Line::from(vec![
        Span::styled(value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

/// `◀ G+2 ▶` while focused, the plain value otherwise
fn choice_line(value: &str, is_active: bool) -> Line<'_> {
    if !is_active {
        return Line::from(value);
    }
    let arrow = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::styled("◀ ", arrow),
        Span::styled(
            value,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", arrow),
    ])
}
