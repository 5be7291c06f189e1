//! Advance-key handling: Enter moves to the next field, or submits on the last

use super::catalog::{catalog, FieldCatalog};
use super::field::FieldName;
use super::focus::FocusTracker;

/// What an advance key press on a field resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Focus moved to this field
    Focused(FieldName),
    /// The field was last in the traversal order; submit the form
    Submit,
    /// The field is not part of the traversal order
    Ignored,
}

/// Resolve an advance key press against the traversal order
pub fn advance_target(catalog: &FieldCatalog, field: FieldName) -> Advance {
    let order = catalog.order();
    match catalog.position(field) {
        None => Advance::Ignored,
        Some(i) if i + 1 == order.len() => Advance::Submit,
        Some(i) => Advance::Focused(order[i + 1]),
    }
}

/// Handle the advance key on `field`, moving focus when appropriate.
/// The caller triggers submission on [`Advance::Submit`].
pub fn on_advance_key(focus: &mut FocusTracker, field: FieldName) -> Advance {
    let outcome = advance_target(catalog(), field);
    if let Advance::Focused(next) = outcome {
        focus.focus(next);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::{FieldDefinition, FieldKind, SectionId};
    use crate::state::forms::SectionSpec;

    #[test]
    fn test_advance_moves_to_next_in_order() {
        let order = catalog().order();
        for i in 0..order.len() - 1 {
            let mut focus = FocusTracker::default();
            focus.focus(order[i]);
            let outcome = on_advance_key(&mut focus, order[i]);
            assert_eq!(outcome, Advance::Focused(order[i + 1]));
            assert_eq!(focus.focused(), Some(order[i + 1]));
        }
    }

    #[test]
    fn test_advance_crosses_sections() {
        let mut focus = FocusTracker::default();
        focus.focus(FieldName::Location);
        assert_eq!(
            on_advance_key(&mut focus, FieldName::Location),
            Advance::Focused(FieldName::Budget)
        );
        assert_eq!(focus.current_step().step, 2);
    }

    #[test]
    fn test_advance_on_last_submits_without_moving_focus() {
        let mut focus = FocusTracker::default();
        focus.focus(FieldName::MaterialCost);
        assert_eq!(
            on_advance_key(&mut focus, FieldName::MaterialCost),
            Advance::Submit
        );
        assert_eq!(focus.focused(), Some(FieldName::MaterialCost));
    }

    #[test]
    fn test_field_outside_order_is_ignored() {
        const FIELDS: &[FieldDefinition] = &[FieldDefinition {
            name: FieldName::Budget,
            label: "Budget",
            kind: FieldKind::Number,
            optional: true,
            max: None,
            section: SectionId::Budget,
            noun: "budget",
            tooltip: "",
        }];
        let sections = [SectionSpec {
            id: SectionId::Budget,
            title: "Budget",
            step: 1,
        }];
        let small = FieldCatalog::new(FIELDS, &sections, &[FieldName::Budget]);
        assert_eq!(
            advance_target(&small, FieldName::Duration),
            Advance::Ignored
        );
        assert_eq!(advance_target(&small, FieldName::Budget), Advance::Submit);
    }
}
