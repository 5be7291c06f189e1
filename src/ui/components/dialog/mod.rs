//! Dialog components for TUI

mod base;
mod tooltip_dialog;

pub use tooltip_dialog::render_tooltip_dialog;
