//! Field focus and the wizard step derived from it

use super::catalog::{catalog, FieldCatalog};
use super::field::FieldName;

/// "Step X of N" shown above the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardStep {
    pub step: usize,
    pub total: usize,
}

/// Which field currently has input focus, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusTracker {
    focused: Option<FieldName>,
}

impl FocusTracker {
    /// Start with focus on the first field of the traversal order
    pub fn starting_at_first() -> Self {
        Self {
            focused: catalog().first_field(),
        }
    }

    pub fn focused(&self) -> Option<FieldName> {
        self.focused
    }

    pub fn is_focused(&self, name: FieldName) -> bool {
        self.focused == Some(name)
    }

    pub fn focus(&mut self, name: FieldName) {
        self.focused = Some(name);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Move focus along the traversal order, wrapping at both ends.
    /// With nothing focused, forward lands on the first field and
    /// backward on the last.
    pub fn cycle(&mut self, forward: bool) {
        let order = catalog().order();
        if order.is_empty() {
            return;
        }
        let current = self.focused.and_then(|name| catalog().position(name));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % order.len(),
            (Some(0), false) | (None, false) => order.len() - 1,
            (Some(i), false) => i - 1,
            (None, true) => 0,
        };
        self.focused = Some(order[next]);
    }

    /// Wizard step for the standard catalog
    pub fn current_step(&self) -> WizardStep {
        self.current_step_in(catalog())
    }

    /// Step of the section holding the focused field; step 1 when nothing
    /// is focused or the field has no section
    pub fn current_step_in(&self, catalog: &FieldCatalog) -> WizardStep {
        let total = catalog.sections().len();
        let step = self
            .focused
            .and_then(|name| catalog.section_of(name))
            .map(|section| section.step)
            .unwrap_or(1);
        WizardStep { step, total }
    }
}
