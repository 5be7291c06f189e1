//! Form domain layer
//!
//! Static field catalog, raw form values, focus tracking, keyboard
//! traversal and validation for the project-details wizard.

mod catalog;
mod field;
mod focus;
mod form_state;
mod navigator;
mod validation;

pub use catalog::{
    catalog, FieldCatalog, Section, SectionSpec, FLOOR_OPTIONS, MAX_BUILT_UP_AREA, MAX_DURATION_DAYS,
};
pub use field::{FieldDefinition, FieldKind, FieldName, SectionId};
pub use focus::{FocusTracker, WizardStep};
pub use form_state::FormState;
pub use navigator::{advance_target, on_advance_key, Advance};
pub use validation::{validate, validate_with, ErrorMap};
