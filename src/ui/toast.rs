//! Toast stack in the top-right corner

use crate::state::{Notifications, Severity};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;
/// Oldest toasts beyond this are hidden until newer ones expire
const MAX_VISIBLE: usize = 4;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

/// Draw the newest toasts stacked downwards from the top-right corner
pub fn draw_toasts(frame: &mut Frame, notifications: &Notifications) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let toasts: Vec<_> = notifications.visible().collect();
    let skip = toasts.len().saturating_sub(MAX_VISIBLE);

    for (slot, toast) in toasts.iter().skip(skip).enumerate() {
        let y = area.y + 1 + slot as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.bottom() {
            break;
        }
        let toast_area = Rect {
            x: area.right().saturating_sub(width + 1),
            y,
            width,
            height: TOAST_HEIGHT,
        };
        let color = severity_color(toast.severity);

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .title(format!(" {} ", toast.severity.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let body = Paragraph::new(Line::from(toast.message.as_str()))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, toast_area);
    }
}
