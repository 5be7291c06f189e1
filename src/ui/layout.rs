//! Layout components (content area, status bar)

use crate::app::App;
use crate::pipeline::SubmissionStatus;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    let status = app.submission_status();
    let indicator = match status {
        SubmissionStatus::Idle => Span::styled(" ● ", Style::default().fg(Color::Green)),
        _ => Span::styled(" ◐ ", Style::default().fg(Color::Yellow)),
    };
    spans.push(indicator);

    let hints = get_view_hints(app.state.current_view, status.is_busy());
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(bar, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.right().saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View, busy: bool) -> String {
    match view {
        View::Wizard if busy => "Generating plan...  Tab:move focus".to_string(),
        View::Wizard => format!(
            "Tab/↑↓:field  ←→:option  Enter:next  {SUBMIT_SHORTCUT}:generate  F1:help  Esc:unfocus"
        ),
        View::Results => "↑↓:scroll  b/Esc:new plan  q:quit".to_string(),
    }
}
