//! Application state module

mod app_state;
pub mod forms;
pub mod notifications;
mod plan;
mod progress_bar;

pub use app_state::*;
pub use forms::{
    catalog, FieldDefinition, FieldKind, FieldName, FormState, Section, FLOOR_OPTIONS,
    MAX_BUILT_UP_AREA, MAX_DURATION_DAYS,
};
pub use notifications::{NotificationSink, Notifications, Severity};
pub use plan::*;
