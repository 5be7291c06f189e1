//! Field value objects for the project-details form

use std::fmt;

/// Longest value a number field takes, decimal point included
pub const MAX_NUMBER_LEN: usize = 12;

/// Every input of the project-details wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    BuiltUpArea,
    Floors,
    Duration,
    Location,
    Budget,
    WageRate,
    MaterialCost,
}

impl FieldName {
    /// Form key used by the wizard (camelCase, as shown in help and logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuiltUpArea => "builtUpArea",
            Self::Floors => "floors",
            Self::Duration => "duration",
            Self::Location => "location",
            Self::Budget => "budget",
            Self::WageRate => "wageRate",
            Self::MaterialCost => "materialCost",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sections group fields into wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Project,
    Budget,
    Cost,
}

/// Input kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// Fixed list of options; the first one is the default
    Choice(&'static [&'static str]),
}

impl FieldKind {
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number)
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Choice(options) => options,
            _ => &[],
        }
    }

    /// Whether `c` may be typed into a field of this kind holding `current`.
    ///
    /// Number fields take up to [`MAX_NUMBER_LEN`] digits and a single
    /// decimal point; choice fields are changed by cycling, never by typing.
    pub fn accepts_char(&self, current: &str, c: char) -> bool {
        match self {
            Self::Text => !c.is_control(),
            Self::Number if current.len() >= MAX_NUMBER_LEN => false,
            Self::Number => c.is_ascii_digit() || (c == '.' && !current.contains('.')),
            Self::Choice(_) => false,
        }
    }
}

/// Static description of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
    /// Largest accepted value of a number field
    pub max: Option<u32>,
    pub section: SectionId,
    /// Lower-case noun for validation messages ("Valid {noun} is required")
    pub noun: &'static str,
    pub tooltip: &'static str,
}

impl FieldDefinition {
    /// Label with the optional marker appended
    pub fn display_label(&self) -> String {
        if self.optional {
            format!("{} (optional)", self.label)
        } else {
            self.label.to_string()
        }
    }
}
