//! Effort Scheduler
//!
//! Reps-in-reserve (RIR) scheduling and load decisions:
//! - scheduled RIR per mesocycle week (tabled for 4/5/6 weeks, linear otherwise)
//! - effort validation against a target
//! - weekly load adjustments from reported RIR
//! - next-week load projection and intra-session autoregulation
//!
//! Everything here is a pure function of its inputs and `&TrainingState`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{LoadReport, MuscleGroup, VolumeStatus};
use crate::state::{TrainingState, END_RIR, START_RIR};

/// Accepted |actual - target| RIR before effort is flagged
pub const DEFAULT_RIR_TOLERANCE: f64 = 1.0;

const MAX_LOAD_ADJUSTMENT: f64 = 15.0;
const FINAL_RIR: f64 = 0.0;

/// Round to the nearest 0.5, for presentation only
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
/// Scheduled RIR
// ---------------------------------------------------------------------------

const RIR_SCHEDULE_4: [f64; 4] = [3.0, 2.0, 1.0, 0.0];
const RIR_SCHEDULE_5: [f64; 5] = [3.0, 2.5, 2.0, 1.0, 0.0];
const RIR_SCHEDULE_6: [f64; 6] = [3.0, 2.5, 2.0, 1.5, 1.0, 0.0];

/// Scheduled RIR for `week` of a `meso_len`-week mesocycle.
///
/// Weeks past the end of a tabled schedule stay at its last entry.
pub fn scheduled_rir(week: u32, meso_len: u32) -> f64 {
    let table: Option<&[f64]> = match meso_len {
        4 => Some(&RIR_SCHEDULE_4[..]),
        5 => Some(&RIR_SCHEDULE_5[..]),
        6 => Some(&RIR_SCHEDULE_6[..]),
        _ => None,
    };

    if let Some(table) = table {
        let index = (week.saturating_sub(1) as usize).min(table.len() - 1);
        return table[index];
    }

    if meso_len <= 1 {
        return START_RIR;
    }

    let rate = (START_RIR - FINAL_RIR) / f64::from(meso_len - 1);
    (START_RIR - rate * f64::from(week.saturating_sub(1))).max(FINAL_RIR)
}

/// Linear 3 -> 0.5 target, clamped into that range
pub fn linear_target_rir(week: u32, meso_len: u32) -> f64 {
    if meso_len <= 1 {
        return START_RIR;
    }
    let rate = (START_RIR - END_RIR) / f64::from(meso_len - 1);
    let target = START_RIR - rate * f64::from(week.saturating_sub(1));
    target.clamp(END_RIR, START_RIR)
}

// ---------------------------------------------------------------------------
/// Target RIR Plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    Low,
    Moderate,
    High,
    Maximum,
}

impl IntensityLevel {
    fn from_rir(rir: f64) -> Self {
        if rir >= 2.5 {
            Self::Low
        } else if rir >= 2.0 {
            Self::Moderate
        } else if rir >= 1.0 {
            Self::High
        } else {
            Self::Maximum
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Focus on form and mind-muscle connection",
            Self::Moderate => "Balanced effort - challenge without excessive fatigue",
            Self::High => "High effort - monitor recovery closely",
            Self::Maximum => "Maximum effort - deload approaching",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRirPlan {
    /// Rounded to the nearest 0.5
    pub target_rir: f64,
    pub intensity: IntensityLevel,
    pub advice: String,
    /// How far through the mesocycle, 0..=100
    pub progression_percent: u32,
    pub week: u32,
    pub meso_length: u32,
    pub warning: Option<String>,
}

pub fn calculate_target_rir(week: u32, meso_len: u32) -> TargetRirPlan {
    if week > meso_len {
        warn!(week, meso_len, "Week exceeds mesocycle length");
        let intensity = IntensityLevel::from_rir(START_RIR);
        return TargetRirPlan {
            target_rir: START_RIR,
            intensity,
            advice: intensity.advice().to_string(),
            progression_percent: 0,
            week,
            meso_length: meso_len,
            warning: Some("Week exceeds mesocycle length".to_string()),
        };
    }

    let target = linear_target_rir(week, meso_len);
    let progression_percent = if meso_len <= 1 {
        0
    } else {
        (f64::from(week.saturating_sub(1)) / f64::from(meso_len - 1) * 100.0).round() as u32
    };
    let intensity = IntensityLevel::from_rir(target);

    TargetRirPlan {
        target_rir: round_to_half(target),
        intensity,
        advice: intensity.advice().to_string(),
        progression_percent,
        week,
        meso_length: meso_len,
        warning: None,
    }
}

// ---------------------------------------------------------------------------
/// Effort Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortVerdict {
    OnTarget,
    TooEasy,
    TooHard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Normal,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortValidation {
    pub actual_rir: f64,
    pub target_rir: f64,
    /// Absolute distance from target
    pub deviation: f64,
    pub verdict: EffortVerdict,
    pub feedback: String,
    pub recommendation: String,
    pub urgency: Urgency,
}

impl EffortValidation {
    pub fn is_within_tolerance(&self) -> bool {
        self.verdict == EffortVerdict::OnTarget
    }
}

pub fn validate_effort_level(actual_rir: f64, target_rir: f64, tolerance: f64) -> EffortValidation {
    let deviation = (actual_rir - target_rir).abs();

    let (verdict, feedback, recommendation, urgency) = if deviation <= tolerance {
        (
            EffortVerdict::OnTarget,
            format!("On target ({} vs {} RIR)", actual_rir, target_rir),
            "Continue current effort level",
            Urgency::Normal,
        )
    } else if actual_rir > target_rir {
        let significant = deviation > 2.0;
        (
            EffortVerdict::TooEasy,
            format!("Too easy ({:.1} RIR above target)", deviation),
            if significant {
                "Increase weight significantly"
            } else {
                "Increase weight moderately"
            },
            if significant { Urgency::High } else { Urgency::Medium },
        )
    } else {
        let significant = deviation > 2.0;
        (
            EffortVerdict::TooHard,
            format!("Too hard ({:.1} RIR below target)", deviation),
            if significant {
                "Reduce weight significantly"
            } else {
                "Reduce weight slightly"
            },
            if significant { Urgency::High } else { Urgency::Medium },
        )
    };

    EffortValidation {
        actual_rir,
        target_rir,
        deviation,
        verdict,
        feedback,
        recommendation: recommendation.to_string(),
        urgency,
    }
}

// ---------------------------------------------------------------------------
/// Weekly Load Adjustments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadAdjustment {
    pub current_rir: f64,
    pub target_rir: f64,
    /// Signed: positive means the week was easier than scheduled
    pub deviation: f64,
    /// Percent change to working load, within +/-15
    pub load_adjustment: f64,
    pub reason: String,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadAdjustmentSummary {
    pub total_muscles: usize,
    pub muscles_adjusted: usize,
    pub avg_load_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadAdjustmentPlan {
    pub week: u32,
    pub target_rir: f64,
    pub adjustments: BTreeMap<MuscleGroup, LoadAdjustment>,
    pub summary: LoadAdjustmentSummary,
}

fn base_load_adjustment(deviation: f64) -> (f64, &'static str) {
    if deviation.abs() <= 0.5 {
        (2.5, "On target - progressive overload")
    } else if deviation > 2.0 {
        (10.0, "Too easy - major increase needed")
    } else if deviation > 1.0 {
        (7.5, "Too easy - moderate increase")
    } else if deviation > 0.0 {
        (5.0, "Slightly easy - small increase")
    } else if deviation < -2.0 {
        (-10.0, "Too hard - major decrease needed")
    } else if deviation < -1.0 {
        (-5.0, "Too hard - moderate decrease")
    } else {
        (-2.5, "Slightly hard - small decrease")
    }
}

/// Per-muscle load change for next week from this week's reported RIR
pub fn process_weekly_load_adjustments(
    state: &TrainingState,
    reports: &BTreeMap<MuscleGroup, LoadReport>,
) -> LoadAdjustmentPlan {
    let target = scheduled_rir(state.week_no, state.meso_len);

    let adjustments: BTreeMap<MuscleGroup, LoadAdjustment> = reports
        .iter()
        .map(|(muscle, report)| {
            let current = report.average_rir.unwrap_or(target);
            let deviation = current - target;
            let (mut adjustment, base_reason) = base_load_adjustment(deviation);
            let mut reason = base_reason.to_string();

            if report.performance_trend < 0 {
                adjustment -= 2.5;
                reason.push_str(" (performance declining)");
            } else if report.performance_trend > 0 && deviation >= 0.0 {
                adjustment += 2.5;
                reason.push_str(" (performance improving)");
            }

            let adjustment = adjustment.clamp(-MAX_LOAD_ADJUSTMENT, MAX_LOAD_ADJUSTMENT);
            let urgency = if deviation.abs() > 1.5 {
                Urgency::High
            } else if deviation.abs() > 1.0 {
                Urgency::Medium
            } else {
                Urgency::Low
            };

            debug!(%muscle, deviation, adjustment, "Load adjustment");

            (
                *muscle,
                LoadAdjustment {
                    current_rir: current,
                    target_rir: target,
                    deviation,
                    load_adjustment: adjustment,
                    reason,
                    urgency,
                },
            )
        })
        .collect();

    let muscles_adjusted = adjustments
        .values()
        .filter(|a| a.load_adjustment.abs() > 2.5)
        .count();
    let avg_load_change = if adjustments.is_empty() {
        0.0
    } else {
        adjustments.values().map(|a| a.load_adjustment).sum::<f64>() / adjustments.len() as f64
    };

    LoadAdjustmentPlan {
        week: state.week_no,
        target_rir: target,
        summary: LoadAdjustmentSummary {
            total_muscles: adjustments.len(),
            muscles_adjusted,
            avg_load_change,
        },
        adjustments,
    }
}

// ---------------------------------------------------------------------------
/// Next-Week Load Projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadProgression {
    pub muscle: MuscleGroup,
    pub current_week: u32,
    pub next_week: u32,
    pub current_rir: f64,
    pub next_rir: f64,
    pub rir_drop: f64,
    /// Percent, rounded to 0.1
    pub load_increase: f64,
    pub recommendation: String,
    pub volume_status: VolumeStatus,
}

pub fn load_progression(state: &TrainingState, muscle: MuscleGroup, report: &LoadReport) -> LoadProgression {
    let current_week = state.week_no;
    let next_week = current_week + 1;
    let current_rir = scheduled_rir(current_week, state.meso_len);
    let next_rir = scheduled_rir(next_week, state.meso_len);
    let rir_drop = current_rir - next_rir;
    let performance = report.average_rir.unwrap_or(current_rir) - current_rir;

    let (mut increase, mut recommendation) = if rir_drop > 0.0 {
        let base = 5.0 * rir_drop;
        if performance > 1.0 {
            let inc = base + 5.0;
            (
                inc,
                format!(
                    "Increase load {:.1}% for Week {} (RIR {}) - currently too easy",
                    inc, next_week, next_rir
                ),
            )
        } else if performance < -1.0 {
            let inc = base * 0.5;
            (
                inc,
                format!(
                    "Conservative increase {:.1}% for Week {} (RIR {}) - struggling with current load",
                    inc, next_week, next_rir
                ),
            )
        } else {
            (
                base,
                format!("Standard increase {:.1}% for Week {} (RIR {})", base, next_week, next_rir),
            )
        }
    } else if rir_drop == 0.0 {
        (
            2.5,
            format!("Small progressive overload 2.5% for Week {} (RIR {})", next_week, next_rir),
        )
    } else {
        (
            0.0,
            format!("Maintain current load for Week {} (RIR {})", next_week, next_rir),
        )
    };

    let volume_status = state.volume_status(muscle);
    if volume_status == VolumeStatus::Maximum {
        increase *= 0.75;
        recommendation.push_str(" (reduced due to MRV)");
    }

    LoadProgression {
        muscle,
        current_week,
        next_week,
        current_rir,
        next_rir,
        rir_drop,
        load_increase: round_to_tenth(increase),
        recommendation,
        volume_status,
    }
}

// ---------------------------------------------------------------------------
/// Session-to-Session Effort Progression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightRecommendation {
    Increase,
    Maintain,
    Decrease,
}

/// Target and achieved RIR from the previous session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionRir {
    pub actual_rir: f64,
    pub target_rir: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortProgression {
    pub muscle: MuscleGroup,
    pub current_target_rir: f64,
    pub projected_rir: f64,
    pub weight_recommendation: WeightRecommendation,
    pub advice: String,
    pub volume_status: VolumeStatus,
}

pub fn effort_progression(state: &TrainingState, muscle: MuscleGroup, last_session: &SessionRir) -> EffortProgression {
    let current_target_rir = state.target_rir();
    let volume_status = state.volume_status(muscle);
    let at_mrv = volume_status == VolumeStatus::Maximum;

    let (mut weight_recommendation, rir_adjustment, mut advice) =
        if last_session.actual_rir < last_session.target_rir - 1.5 {
            (WeightRecommendation::Decrease, 0.5, "Reduce weight to hit target RIR")
        } else if last_session.actual_rir > last_session.target_rir + 1.5 {
            (WeightRecommendation::Increase, -0.5, "Increase weight to hit target RIR")
        } else if at_mrv {
            (WeightRecommendation::Maintain, 0.0, "Maintain weight - at volume limit")
        } else {
            (WeightRecommendation::Maintain, 0.0, "Good effort level - continue progression")
        };

    if at_mrv && weight_recommendation == WeightRecommendation::Increase {
        weight_recommendation = WeightRecommendation::Maintain;
        advice = "At MRV - avoid adding intensity stress";
    }

    EffortProgression {
        muscle,
        current_target_rir,
        projected_rir: (current_target_rir + rir_adjustment).max(0.0),
        weight_recommendation,
        advice: advice.to_string(),
        volume_status,
    }
}

// ---------------------------------------------------------------------------
/// Intra-Session Autoregulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    Continue,
    IncreaseWeight,
    DecreaseWeight,
    ConsiderStopping,
    ConsiderAddingSets,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetFeedback {
    pub actual_rir: f64,
    pub planned_rir: f64,
    /// 1-based
    pub set_number: u32,
    pub total_planned_sets: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoregulationAdvice {
    pub set_number: u32,
    pub total_planned_sets: u32,
    pub deviation: f64,
    pub advice: String,
    pub action: SessionAction,
    /// Percent change to the working weight
    pub weight_adjustment: f64,
}

/// Advice for the next set, depending on which third of the session we're in
pub fn autoregulation_advice(feedback: &SetFeedback) -> AutoregulationAdvice {
    let deviation = feedback.actual_rir - feedback.planned_rir;
    let early_cutoff = feedback.total_planned_sets.div_ceil(3);
    let middle_cutoff = (feedback.total_planned_sets * 2).div_ceil(3);

    let (advice, action, weight_adjustment) = if feedback.set_number <= early_cutoff {
        if deviation > 1.5 {
            ("Weight too light - increase by 5-10%", SessionAction::IncreaseWeight, 7.5)
        } else if deviation < -1.5 {
            ("Weight too heavy - decrease by 5-10%", SessionAction::DecreaseWeight, -7.5)
        } else {
            ("Weight appropriate - continue", SessionAction::Continue, 0.0)
        }
    } else if feedback.set_number <= middle_cutoff {
        if deviation > 2.0 {
            ("Still too easy - increase weight", SessionAction::IncreaseWeight, 5.0)
        } else if deviation < -2.0 {
            ("Too fatiguing - consider stopping early", SessionAction::ConsiderStopping, 0.0)
        } else {
            ("Good progression - continue", SessionAction::Continue, 0.0)
        }
    } else if deviation < -1.0 {
        (
            "Very fatiguing - consider stopping to preserve recovery",
            SessionAction::ConsiderStopping,
            0.0,
        )
    } else if deviation > 2.0 {
        (
            "Could push harder - add 1-2 sets if recovering well",
            SessionAction::ConsiderAddingSets,
            0.0,
        )
    } else {
        ("Appropriate fatigue for final sets", SessionAction::Continue, 0.0)
    };

    AutoregulationAdvice {
        set_number: feedback.set_number,
        total_planned_sets: feedback.total_planned_sets,
        deviation,
        advice: advice.to_string(),
        action,
        weight_adjustment,
    }
}

// ---------------------------------------------------------------------------
/// Weekly Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEffortSummary {
    pub current_week: u32,
    pub meso_length: u32,
    pub target_rir: f64,
    pub weekly_advice: Vec<String>,
    pub phase_description: String,
}

pub fn weekly_effort_summary(state: &TrainingState) -> WeeklyEffortSummary {
    let week = state.week_no;
    let meso_len = state.meso_len;

    let advice: [&str; 2] = if week == 1 {
        [
            "Focus on technique and mind-muscle connection",
            "Establish baseline weights for the mesocycle",
        ]
    } else if week == meso_len {
        [
            "Peak intensity week - push close to failure",
            "Prepare for upcoming deload",
        ]
    } else if f64::from(week) > f64::from(meso_len) * 0.75 {
        [
            "High intensity phase - monitor recovery closely",
            "Focus on performance over volume additions",
        ]
    } else {
        [
            "Progressive overload phase - gradually increase demands",
            "Balance volume and intensity progression",
        ]
    };

    WeeklyEffortSummary {
        current_week: week,
        meso_length: meso_len,
        target_rir: state.target_rir(),
        weekly_advice: advice.iter().map(|s| s.to_string()).collect(),
        phase_description: phase_description(week, meso_len).to_string(),
    }
}

pub fn phase_description(week: u32, meso_len: u32) -> &'static str {
    let percentage = f64::from(week) / f64::from(meso_len.max(1)) * 100.0;
    if percentage <= 25.0 {
        "Accumulation Phase - Building foundation"
    } else if percentage <= 60.0 {
        "Progression Phase - Steady overload"
    } else if percentage <= 85.0 {
        "Intensification Phase - High demands"
    } else {
        "Peak Phase - Maximum effort"
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
