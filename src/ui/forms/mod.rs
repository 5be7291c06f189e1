//! Form rendering module
//!
//! - `field_renderer`: single field boxes
//! - `wizard_form`: the project-details wizard

mod field_renderer;
mod wizard_form;

pub use wizard_form::draw_wizard;
#[cfg(test)]
pub use wizard_form::{PROGRESS_LABEL, SUBMIT_LABEL, TITLE};
