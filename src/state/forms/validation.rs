//! Client-side validation of the project form

use super::catalog::{catalog, FieldCatalog};
use super::field::{FieldDefinition, FieldName};
use super::form_state::FormState;
use std::collections::BTreeMap;

/// Field -> message. Empty means the form is valid.
pub type ErrorMap = BTreeMap<FieldName, String>;

/// Validate against the standard catalog
pub fn validate(form: &FormState) -> ErrorMap {
    validate_with(catalog(), form)
}

/// Required number fields must parse to a value above zero and no larger
/// than the field's `max`; optional fields never produce an error.
pub fn validate_with(catalog: &FieldCatalog, form: &FormState) -> ErrorMap {
    catalog
        .fields()
        .iter()
        .filter(|def| !def.optional && def.kind.is_number())
        .filter_map(|def| number_error(def, form.number(def.name)).map(|e| (def.name, e)))
        .collect()
}

fn number_error(def: &FieldDefinition, value: Option<f64>) -> Option<String> {
    match (value, def.max) {
        (Some(v), Some(max)) if v > f64::from(max) => {
            Some(format!("{} must be at most {max}", capitalize(def.noun)))
        }
        (Some(v), _) if v > 0.0 => None,
        _ => Some(format!("Valid {} is required", def.noun)),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
