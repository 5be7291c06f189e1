//! Field help dialog

use super::base::{render_dialog, DialogConfig};
use crate::state::FieldDefinition;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render a field's help text centered on the screen
pub fn render_tooltip_dialog(frame: &mut Frame, field: &FieldDefinition) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Press "),
        Span::styled("F1", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to close"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: field.label,
            accent: Color::Cyan,
            message: field.tooltip,
            hint: Some(hint),
            max_width: 56,
        },
    );
}
