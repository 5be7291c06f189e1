//! Generated plan view

use crate::state::ResultsState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const RESULTS_TITLE: &str = "Your AI Construction Plan";
pub const FALLBACK_BANNER: &str =
    "Demo mode: sample plan generated locally because the estimation service is unavailable";

/// Width of the phase bars at 100% of the timeline
const PHASE_BAR_WIDTH: usize = 24;

pub fn draw(frame: &mut Frame, area: Rect, results: Option<&ResultsState>) {
    let block = Block::default()
        .title(format!(" {RESULTS_TITLE} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(results) = results else {
        let empty = Paragraph::new("No plan data found. Press b to create a plan.").block(block);
        frame.render_widget(empty, area);
        return;
    };

    let paragraph = Paragraph::new(plan_lines(results))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((results.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<16}", capitalize(label)), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Every line of the results page, top to bottom
pub fn plan_lines(results: &ResultsState) -> Vec<Line<'static>> {
    let plan = &results.plan;
    let mut lines = Vec::new();

    if results.is_fallback() {
        lines.push(Line::from(Span::styled(
            FALLBACK_BANNER,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    lines.push(heading("Worker Requirements"));
    let workers = &plan.worker_requirements;
    lines.push(row("skilled", workers.skilled.to_string()));
    lines.push(row("unskilled", workers.unskilled.to_string()));
    lines.push(row("supervisors", workers.supervisors.to_string()));
    lines.push(Line::from(""));

    lines.push(heading("Timeline"));
    let total_days = plan.timeline.total_days;
    lines.push(row("Total Duration", format!("{total_days} days")));
    for phase in &plan.timeline.phases {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", phase.name), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:>4} days  ", phase.days),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                phase_bar(phase.start, phase.days, total_days),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(heading("Cost Breakdown"));
    for (category, amount) in &plan.cost_breakdown {
        lines.push(row(category, format!("₹{}", format_amount(*amount))));
    }
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {:<16}", "Total"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("₹{}", format_amount(plan.total_cost())),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    lines.push(heading("Material Estimation"));
    for (material, quantity) in &plan.material_estimation {
        lines.push(row(material, format!("{} units", format_amount(*quantity))));
    }
    lines.push(Line::from(""));

    lines.push(heading("Weekly Schedule"));
    for week in &plan.weekly_schedule {
        lines.push(Line::from(vec![
            Span::styled(format!("  Week {:<3} ", week.week), Style::default().fg(Color::Gray)),
            Span::raw(week.tasks.join(", ")),
        ]));
    }

    lines
}

/// Gantt-style bar: offset by the phase start, as long as its share
fn phase_bar(start: u32, days: u32, total_days: u32) -> String {
    let total = total_days.max(1) as usize;
    let offset = (start as usize * PHASE_BAR_WIDTH / total).min(PHASE_BAR_WIDTH);
    let filled = (days as usize * PHASE_BAR_WIDTH)
        .div_ceil(total)
        .min(PHASE_BAR_WIDTH - offset);
    format!("{}{}", " ".repeat(offset), "█".repeat(filled))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `4800000` -> `4,800,000`; fractions keep up to two digits
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents > 0 {
        let fraction = format!("{cents:02}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}
