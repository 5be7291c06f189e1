//! Raw form values keyed by field

use super::catalog::{catalog, FieldCatalog};
use super::field::{FieldKind, FieldName};
use std::collections::BTreeMap;

/// Mapping field -> raw, unparsed string value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<FieldName, String>,
}

impl FormState {
    /// Fresh form for the standard catalog
    pub fn new() -> Self {
        Self::for_catalog(catalog())
    }

    /// All fields empty, except choice fields which start at their first option
    pub fn for_catalog(catalog: &FieldCatalog) -> Self {
        let values = catalog
            .fields()
            .iter()
            .map(|def| {
                let initial = def.kind.options().first().copied().unwrap_or_default();
                (def.name, initial.to_string())
            })
            .collect();
        Self { values }
    }

    /// Raw value of a field (empty for fields not in the form)
    pub fn get(&self, name: FieldName) -> &str {
        self.values.get(&name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    /// Builder-style setter, handy for seeding forms
    pub fn with(mut self, name: FieldName, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Trimmed value, or `None` when blank
    pub fn non_empty(&self, name: FieldName) -> Option<&str> {
        let value = self.get(name).trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Parse a field as a finite number
    pub fn number(&self, name: FieldName) -> Option<f64> {
        self.non_empty(name)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Type a character into a field if its kind accepts it.
    /// Returns whether the value changed.
    pub fn push_char(&mut self, name: FieldName, c: char) -> bool {
        let Some(def) = catalog().field(name) else {
            return false;
        };
        let value = self.values.entry(name).or_default();
        if def.kind.accepts_char(value, c) {
            value.push(c);
            true
        } else {
            false
        }
    }

    /// Remove the last character of a typed field
    pub fn pop_char(&mut self, name: FieldName) {
        let is_choice = matches!(
            catalog().field(name).map(|d| d.kind),
            Some(FieldKind::Choice(_))
        );
        if is_choice {
            return;
        }
        if let Some(value) = self.values.get_mut(&name) {
            value.pop();
        }
    }

    /// Step a choice field to the next (or previous) option, wrapping around
    pub fn cycle_option(&mut self, name: FieldName, forward: bool) {
        let options = match catalog().field(name).map(|d| d.kind) {
            Some(FieldKind::Choice(options)) if !options.is_empty() => options,
            _ => return,
        };
        let current = options.iter().position(|o| *o == self.get(name));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) | (None, false) => options.len() - 1,
            (Some(i), false) => i - 1,
            (None, true) => 0,
        };
        self.set(name, options[next]);
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
