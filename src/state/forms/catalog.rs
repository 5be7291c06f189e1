//! Static field catalog: field table, sections and traversal order
//!
//! The whole form is described by one table, `{field: {kind, optional, section}}`.
//! Sections list their fields in table order. Invariants are asserted once
//! when the catalog is built; a broken table is a programming error.

use super::field::{FieldDefinition, FieldKind, FieldName, SectionId};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Floor options; the ordinal position drives the floor count (G+1 = 2 floors)
pub const FLOOR_OPTIONS: &[&str] = &["G+1", "G+2", "G+3", "G+4"];

/// Upper bounds for the required numbers; the weekly schedule grows with the duration
pub const MAX_BUILT_UP_AREA: u32 = 10_000_000;
pub const MAX_DURATION_DAYS: u32 = 3650;

const FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: FieldName::BuiltUpArea,
        label: "Built-up Area (sq ft)",
        kind: FieldKind::Number,
        optional: false,
        max: Some(MAX_BUILT_UP_AREA),
        section: SectionId::Project,
        noun: "built-up area",
        tooltip: "Total built-up area in square feet. Include all floors.",
    },
    FieldDefinition {
        name: FieldName::Floors,
        label: "Floors",
        kind: FieldKind::Choice(FLOOR_OPTIONS),
        optional: false,
        max: None,
        section: SectionId::Project,
        noun: "floor count",
        tooltip: "Number of floors including ground. G+1 = 2 floors, G+2 = 3 floors, etc.",
    },
    FieldDefinition {
        name: FieldName::Duration,
        label: "Duration (days)",
        kind: FieldKind::Number,
        optional: false,
        max: Some(MAX_DURATION_DAYS),
        section: SectionId::Project,
        noun: "duration",
        tooltip: "Estimated project duration in working days.",
    },
    FieldDefinition {
        name: FieldName::Location,
        label: "Location",
        kind: FieldKind::Text,
        optional: true,
        max: None,
        section: SectionId::Project,
        noun: "location",
        tooltip: "Construction site location (city/region) for labour cost estimates.",
    },
    FieldDefinition {
        name: FieldName::Budget,
        label: "Budget (₹)",
        kind: FieldKind::Number,
        optional: true,
        max: None,
        section: SectionId::Budget,
        noun: "budget",
        tooltip: "Total project budget in ₹. Optional, the planner estimates it if not provided.",
    },
    FieldDefinition {
        name: FieldName::WageRate,
        label: "Wage Rate (₹/day)",
        kind: FieldKind::Number,
        optional: true,
        max: None,
        section: SectionId::Cost,
        noun: "wage rate",
        tooltip: "Daily wage rate per labourer in ₹. Optional, uses regional defaults.",
    },
    FieldDefinition {
        name: FieldName::MaterialCost,
        label: "Material Cost (₹/sq ft)",
        kind: FieldKind::Number,
        optional: true,
        max: None,
        section: SectionId::Cost,
        noun: "material cost",
        tooltip: "Material cost per sq ft in ₹. Optional, uses standard rates.",
    },
];

const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        id: SectionId::Project,
        title: "Project Info",
        step: 1,
    },
    SectionSpec {
        id: SectionId::Budget,
        title: "Budget Info",
        step: 2,
    },
    SectionSpec {
        id: SectionId::Cost,
        title: "Cost Info",
        step: 3,
    },
];

const FIELD_ORDER: &[FieldName] = &[
    FieldName::BuiltUpArea,
    FieldName::Floors,
    FieldName::Duration,
    FieldName::Location,
    FieldName::Budget,
    FieldName::WageRate,
    FieldName::MaterialCost,
];

/// Section header as written in the static table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: SectionId,
    pub title: &'static str,
    pub step: usize,
}

/// A wizard section with its resolved, ordered field list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub fields: Vec<FieldName>,
    pub step: usize,
}

/// Immutable description of the form
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    fields: &'static [FieldDefinition],
    sections: Vec<Section>,
    order: &'static [FieldName],
}

impl FieldCatalog {
    /// Build a catalog, panicking if the tables break an invariant:
    /// every field sits in exactly one known section, steps run 1..=N,
    /// and the traversal order is a permutation of the fields.
    pub fn new(
        fields: &'static [FieldDefinition],
        sections: &[SectionSpec],
        order: &'static [FieldName],
    ) -> Self {
        let mut names = HashSet::new();
        for def in fields {
            assert!(names.insert(def.name), "field {} defined twice", def.name);
        }

        let mut section_ids = HashSet::new();
        for (index, spec) in sections.iter().enumerate() {
            assert!(
                section_ids.insert(spec.id),
                "section {:?} defined twice",
                spec.id
            );
            assert_eq!(
                spec.step,
                index + 1,
                "section {:?} has step {}, expected {}",
                spec.id,
                spec.step,
                index + 1
            );
        }

        for def in fields {
            assert!(
                section_ids.contains(&def.section),
                "field {} belongs to unknown section {:?}",
                def.name,
                def.section
            );
        }

        let resolved: Vec<Section> = sections
            .iter()
            .map(|spec| Section {
                id: spec.id,
                title: spec.title,
                fields: fields
                    .iter()
                    .filter(|def| def.section == spec.id)
                    .map(|def| def.name)
                    .collect(),
                step: spec.step,
            })
            .collect();

        for section in &resolved {
            assert!(
                !section.fields.is_empty(),
                "section {:?} has no fields",
                section.id
            );
        }

        let mut seen = HashSet::new();
        for name in order {
            assert!(
                names.contains(name),
                "field order names undefined field {name}"
            );
            assert!(seen.insert(*name), "field order lists {name} twice");
        }
        assert_eq!(
            seen.len(),
            names.len(),
            "field order must cover every field"
        );

        Self {
            fields,
            sections: resolved,
            order,
        }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        self.fields
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Global keyboard traversal order
    pub fn order(&self) -> &[FieldName] {
        self.order
    }

    pub fn field(&self, name: FieldName) -> Option<&FieldDefinition> {
        self.fields.iter().find(|def| def.name == name)
    }

    pub fn section_of(&self, name: FieldName) -> Option<&Section> {
        self.sections.iter().find(|s| s.fields.contains(&name))
    }

    /// Position of `name` in the traversal order
    pub fn position(&self, name: FieldName) -> Option<usize> {
        self.order.iter().position(|n| *n == name)
    }

    pub fn first_field(&self) -> Option<FieldName> {
        self.order.first().copied()
    }
}

/// The project-details catalog, built and checked on first use
pub fn catalog() -> &'static FieldCatalog {
    static CATALOG: OnceLock<FieldCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| FieldCatalog::new(FIELDS, SECTIONS, FIELD_ORDER))
}
