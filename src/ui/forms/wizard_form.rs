//! Project-details wizard

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{catalog, Section, WizardState};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub const TITLE: &str = "AI Construction Planner";
pub const SUBMIT_LABEL: &str = "Generate AI Plan";
pub const PROGRESS_LABEL: &str = "Generating your AI plan...";

/// Rows a section block needs for its fields
fn section_height(section: &Section) -> u16 {
    section.fields.len() as u16 * FIELD_HEIGHT + 2
}

/// Draw the wizard: header, sections, progress and the submit button
pub fn draw_wizard(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = &app.state.wizard;
    let busy = app.is_busy();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                        // Header
            Constraint::Min(0),                           // Sections
            Constraint::Length(if busy { 3 } else { 0 }), // Progress
            Constraint::Length(BUTTON_HEIGHT),            // Submit
        ])
        .split(area);

    draw_header(frame, chunks[0], wizard);
    draw_sections(frame, chunks[1], wizard);
    if busy {
        draw_progress(frame, chunks[2], wizard);
    }

    let button_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(SUBMIT_LABEL.len() as u16 + 8),
            Constraint::Min(0),
        ])
        .split(chunks[3])[1];
    render_button(
        frame,
        button_area,
        SUBMIT_LABEL,
        wizard.focus.focused().is_none(),
        !busy,
    );
}

fn draw_header(frame: &mut Frame, area: Rect, wizard: &WizardState) {
    let step = wizard.step();
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    let step_label = Paragraph::new(Line::from(Span::styled(
        format!("Step {} of {}", step.step, step.total),
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Right);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    frame.render_widget(title, halves[0]);
    frame.render_widget(step_label, halves[1]);
}

/// First section on the left, the others stacked on the right
fn draw_sections(frame: &mut Frame, area: Rect, wizard: &WizardState) {
    let sections = catalog().sections();
    let Some((first, rest)) = sections.split_first() else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_section(frame, columns[0], first, wizard);

    let mut constraints: Vec<Constraint> = rest
        .iter()
        .map(|s| Constraint::Length(section_height(s)))
        .collect();
    constraints.push(Constraint::Min(0));
    let stack = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[1]);
    for (section, slot) in rest.iter().zip(stack.iter()) {
        draw_section(frame, *slot, section, wizard);
    }
}

fn draw_section(frame: &mut Frame, area: Rect, section: &Section, wizard: &WizardState) {
    let is_current = wizard
        .focus
        .focused()
        .is_some_and(|name| section.fields.contains(&name));
    let border_style = if is_current {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(format!(" {}. {} ", section.step, section.title))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = section
        .fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (name, row) in section.fields.iter().zip(rows.iter()) {
        if let Some(def) = catalog().field(*name) {
            draw_field(
                frame,
                *row,
                def,
                wizard.form.get(*name),
                wizard.focus.is_focused(*name),
                wizard.error(*name),
            );
        }
    }
}

fn draw_progress(frame: &mut Frame, area: Rect, wizard: &WizardState) {
    let ratio = wizard.progress_bar.ratio();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{PROGRESS_LABEL} {:.0}%", ratio * 100.0));
    frame.render_widget(gauge, area);
}
