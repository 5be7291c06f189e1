//! Outbound `/analyze` request body

use crate::state::{FieldName, FormState};
use serde::Serialize;

/// JSON body of `POST /analyze`; empty optional fields are omitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub built_up_area: f64,
    pub floors: String,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wage_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_cost: Option<f64>,
}

impl AnalyzeRequest {
    /// Build the payload from a form that already passed validation.
    ///
    /// Optional numbers that do not parse are dropped like empty ones; the
    /// floors value goes through unchanged.
    pub fn from_form(form: &FormState) -> Self {
        let optional_number = |name: FieldName| {
            let parsed = form.number(name);
            if parsed.is_none() && form.non_empty(name).is_some() {
                tracing::debug!(field = %name, "dropping unparseable optional number");
            }
            parsed
        };

        Self {
            built_up_area: form.number(FieldName::BuiltUpArea).unwrap_or_default(),
            floors: form.get(FieldName::Floors).to_string(),
            duration: form.number(FieldName::Duration).unwrap_or_default(),
            budget: optional_number(FieldName::Budget),
            location: form.non_empty(FieldName::Location).map(str::to_string),
            wage_rate: optional_number(FieldName::WageRate),
            material_cost: optional_number(FieldName::MaterialCost),
        }
    }
}
