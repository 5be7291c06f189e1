//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod results;
mod toast;

use crate::app::App;
use crate::state::{catalog, View};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Wizard => forms::draw_wizard(frame, main_area, app),
        View::Results => results::draw(frame, main_area, app.state.results.as_ref()),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Overlays
    if app.state.current_view == View::Wizard {
        if let Some(field) = app.state.wizard.tooltip.and_then(|name| catalog().field(name)) {
            components::render_tooltip_dialog(frame, field);
        }
    }
    toast::draw_toasts(frame, &app.state.notifications);
}
