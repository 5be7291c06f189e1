//! Construction plan returned by the estimation service (or synthesized locally)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Crew size needed for the project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerRequirements {
    pub skilled: u32,
    pub unskilled: u32,
    pub supervisors: u32,
}

/// One construction phase; `start` is the day offset where it begins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub days: u32,
    #[serde(alias = "start_day")]
    pub start: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub total_days: u32,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// The result entity handed to the results view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub worker_requirements: WorkerRequirements,
    #[serde(default)]
    pub timeline: Timeline,
    /// Category -> amount in ₹
    #[serde(default)]
    pub cost_breakdown: BTreeMap<String, f64>,
    /// Material -> quantity
    #[serde(default)]
    pub material_estimation: BTreeMap<String, f64>,
    #[serde(default)]
    pub weekly_schedule: Vec<WeekPlan>,
}

impl PlanDocument {
    /// Sum of every cost category
    pub fn total_cost(&self) -> f64 {
        self.cost_breakdown.values().sum()
    }
}

/// Where a handed-off plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    /// Returned by the estimation service
    Remote,
    /// Synthesized locally because the service was unavailable
    Fallback,
}
