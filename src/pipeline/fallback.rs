//! Deterministic demo plan used when the estimation service is unavailable

use crate::state::{
    FieldName, FormState, Phase, PlanDocument, Timeline, WeekPlan, WorkerRequirements,
    FLOOR_OPTIONS, MAX_BUILT_UP_AREA, MAX_DURATION_DAYS,
};
use std::collections::BTreeMap;

const DEFAULT_AREA: f64 = 2000.0;
const DEFAULT_FLOORS: u32 = 2;
const DEFAULT_DURATION: u32 = 180;

/// Phase name and cumulative share of the duration (percent) at its end
const PHASES: [(&str, u64); 4] = [
    ("Foundation", 15),
    ("Structure", 60),
    ("MEP & Finishing", 90),
    ("Handover", 100),
];

/// ₹ per sq ft per floor
const COST_RATES: [(&str, f64); 4] = [
    ("labour", 800.0),
    ("materials", 1200.0),
    ("equipment", 150.0),
    ("miscellaneous", 200.0),
];

/// Quantity per sq ft per floor as a fraction (numerator, denominator)
const MATERIAL_RATES: [(&str, f64, f64); 4] = [
    ("cement", 2.0, 5.0),
    ("steel", 4.0, 1.0),
    ("sand", 3.0, 2.0),
    ("bricks", 500.0, 1.0),
];

const WEEKLY_TASKS: [&str; 2] = ["Quality checks", "Progress review"];

/// Inputs the fallback plan depends on, with defaults applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackInputs {
    pub area: f64,
    pub floors: u32,
    pub duration: u32,
}

impl FallbackInputs {
    /// Area defaults to 2000, floors to 2 (G+1), duration to 180 days when
    /// blank, unparseable, not positive or above the field maximum.
    /// Fractional durations round up to whole days.
    pub fn from_form(form: &FormState) -> Self {
        let area = form
            .number(FieldName::BuiltUpArea)
            .filter(|a| *a > 0.0 && *a <= f64::from(MAX_BUILT_UP_AREA))
            .unwrap_or(DEFAULT_AREA);
        let floors = FLOOR_OPTIONS
            .iter()
            .position(|o| *o == form.get(FieldName::Floors))
            .map(|i| i as u32 + 2)
            .unwrap_or(DEFAULT_FLOORS);
        let duration = form
            .number(FieldName::Duration)
            .and_then(whole_days)
            .unwrap_or(DEFAULT_DURATION);

        Self {
            area,
            floors,
            duration,
        }
    }
}

/// Round a duration up to whole days; `None` outside `1..=MAX_DURATION_DAYS`
fn whole_days(days: f64) -> Option<u32> {
    let days = days.ceil();
    if days >= 1.0 && days <= f64::from(MAX_DURATION_DAYS) {
        Some(days as u32)
    } else {
        None
    }
}

/// Synthesize a plan from the form. Pure: equal forms give equal plans.
pub fn synthesize(form: &FormState) -> PlanDocument {
    synthesize_from(FallbackInputs::from_form(form))
}

pub fn synthesize_from(inputs: FallbackInputs) -> PlanDocument {
    let FallbackInputs {
        area,
        floors,
        duration,
    } = inputs;
    let scale = area * f64::from(floors);

    PlanDocument {
        worker_requirements: WorkerRequirements {
            skilled: (area / 500.0).ceil() as u32 + 2,
            unskilled: (area / 300.0).ceil() as u32 + 5,
            supervisors: floors + 1,
        },
        timeline: Timeline {
            total_days: duration,
            phases: phases(duration),
        },
        cost_breakdown: COST_RATES
            .iter()
            .map(|(name, rate)| (name.to_string(), (scale * rate).round()))
            .collect::<BTreeMap<_, _>>(),
        material_estimation: MATERIAL_RATES
            .iter()
            .map(|(name, num, den)| (name.to_string(), (scale * num / den).ceil()))
            .collect::<BTreeMap<_, _>>(),
        weekly_schedule: weekly_schedule(duration),
    }
}

/// Consecutive phases covering `duration` exactly.
///
/// Each phase ends at the rounded-up cumulative share of the duration, so
/// every phase is its share rounded up where the rounding allows and the
/// last phase absorbs the remainder.
fn phases(duration: u32) -> Vec<Phase> {
    let total = u64::from(duration);
    let mut start = 0u64;
    PHASES
        .iter()
        .map(|(name, cumulative)| {
            let end = (total * cumulative).div_ceil(100).clamp(start, total);
            let phase = Phase {
                name: name.to_string(),
                days: (end - start) as u32,
                start: start as u32,
            };
            start = end;
            phase
        })
        .collect()
}

/// One entry per started week, each with the three fixed tasks
fn weekly_schedule(duration: u32) -> Vec<WeekPlan> {
    let total = u64::from(duration.max(1));
    let weeks = total.div_ceil(7);
    (0..weeks)
        .map(|i| {
            let phase = (i * 28 / total).min(3) + 1;
            let mut tasks = vec![format!("Phase {phase} activities")];
            tasks.extend(WEEKLY_TASKS.iter().map(|t| t.to_string()));
            WeekPlan {
                week: i as u32 + 1,
                tasks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(area: &str, floors: &str, duration: &str) -> FormState {
        FormState::new()
            .with(FieldName::BuiltUpArea, area)
            .with(FieldName::Floors, floors)
            .with(FieldName::Duration, duration)
    }

    mod inputs {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parses_form_values() {
            let inputs = FallbackInputs::from_form(&form("1500", "G+3", "90"));
            assert_eq!(
                inputs,
                FallbackInputs {
                    area: 1500.0,
                    floors: 4,
                    duration: 90
                }
            );
        }

        #[test]
        fn test_defaults_for_blank_values() {
            let inputs = FallbackInputs::from_form(&form("", "G+1", ""));
            assert_eq!(inputs.area, 2000.0);
            assert_eq!(inputs.floors, 2);
            assert_eq!(inputs.duration, 180);
        }

        #[test]
        fn test_defaults_for_zero_and_unknown_floor() {
            let inputs = FallbackInputs::from_form(&form("0", "G+9", "0"));
            assert_eq!(inputs.area, 2000.0);
            assert_eq!(inputs.floors, 2);
            assert_eq!(inputs.duration, 180);
        }

        #[test]
        fn test_out_of_range_values_use_defaults() {
            let inputs = FallbackInputs::from_form(&form("99999999999", "G+1", "9999999999"));
            assert_eq!(inputs.area, 2000.0);
            assert_eq!(inputs.duration, 180);
        }

        #[test]
        fn test_longest_duration_keeps_schedule_bounded() {
            let plan = synthesize(&form("2000", "G+1", "3650"));
            assert_eq!(plan.timeline.total_days, 3650);
            assert_eq!(plan.weekly_schedule.len(), 522);
        }

        #[test]
        fn test_fractional_duration_rounds_up() {
            let inputs = FallbackInputs::from_form(&form("1000", "G+1", "10.2"));
            assert_eq!(inputs.duration, 11);
        }
    }

    mod area_2000_g2_180_days {
        use super::*;
        use pretty_assertions::assert_eq;

        fn plan() -> PlanDocument {
            synthesize(&form("2000", "G+2", "180"))
        }

        #[test]
        fn test_total_days() {
            assert_eq!(plan().timeline.total_days, 180);
        }

        #[test]
        fn test_phase_days_and_starts() {
            let plan = plan();
            let days: Vec<u32> = plan.timeline.phases.iter().map(|p| p.days).collect();
            let starts: Vec<u32> = plan.timeline.phases.iter().map(|p| p.start).collect();
            let names: Vec<&str> = plan.timeline.phases.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(days, vec![27, 81, 54, 18]);
            assert_eq!(starts, vec![0, 27, 108, 162]);
            assert_eq!(
                names,
                vec!["Foundation", "Structure", "MEP & Finishing", "Handover"]
            );
        }

        #[test]
        fn test_workers() {
            assert_eq!(
                plan().worker_requirements,
                WorkerRequirements {
                    skilled: 6,
                    unskilled: 12,
                    supervisors: 4,
                }
            );
        }

        #[test]
        fn test_costs_scale_with_area_and_floors() {
            let plan = plan();
            assert_eq!(plan.cost_breakdown["labour"], 4_800_000.0);
            assert_eq!(plan.cost_breakdown["materials"], 7_200_000.0);
            assert_eq!(plan.cost_breakdown["equipment"], 900_000.0);
            assert_eq!(plan.cost_breakdown["miscellaneous"], 1_200_000.0);
        }

        #[test]
        fn test_materials_scale_with_area_and_floors() {
            let plan = plan();
            assert_eq!(plan.material_estimation["cement"], 2400.0);
            assert_eq!(plan.material_estimation["steel"], 24000.0);
            assert_eq!(plan.material_estimation["sand"], 9000.0);
            assert_eq!(plan.material_estimation["bricks"], 3_000_000.0);
        }

        #[test]
        fn test_weekly_schedule() {
            let plan = plan();
            assert_eq!(plan.weekly_schedule.len(), 26);
            assert_eq!(plan.weekly_schedule[0].week, 1);
            assert_eq!(
                plan.weekly_schedule[0].tasks,
                vec!["Phase 1 activities", "Quality checks", "Progress review"]
            );
            assert_eq!(
                plan.weekly_schedule[25].tasks[0],
                "Phase 4 activities"
            );
        }
    }

    #[test]
    fn test_phases_cover_duration_exactly() {
        for duration in 1..=730 {
            let phases = phases(duration);
            assert_eq!(phases.len(), 4);
            let mut expected_start = 0;
            for phase in &phases {
                assert_eq!(phase.start, expected_start, "duration {duration}");
                expected_start += phase.days;
            }
            assert_eq!(expected_start, duration, "duration {duration}");
        }
    }

    #[test]
    fn test_week_count_is_ceiling() {
        for (duration, weeks) in [(1, 1), (7, 1), (8, 2), (14, 2), (15, 3), (180, 26)] {
            assert_eq!(weekly_schedule(duration).len(), weeks, "duration {duration}");
        }
    }

    #[test]
    fn test_week_phase_labels_progress() {
        let labels: Vec<String> = weekly_schedule(56)
            .into_iter()
            .map(|w| w.tasks[0].clone())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Phase 1 activities",
                "Phase 1 activities",
                "Phase 2 activities",
                "Phase 2 activities",
                "Phase 3 activities",
                "Phase 3 activities",
                "Phase 4 activities",
                "Phase 4 activities"
            ]
        );
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let input = form("1234.5", "G+4", "97");
        let first = serde_json::to_vec(&synthesize(&input)).unwrap();
        let second = serde_json::to_vec(&synthesize(&input)).unwrap();
        assert_eq!(first, second);
    }
}
