//! Fatigue Classifier
//!
//! Recovery-side signals:
//! - high-fatigue detection from the stimulus-to-fatigue ratio (SFR) and
//!   strength regressions
//! - session frequency analysis and optimal frequency
//! - whole-program fatigue accumulation score
//! - recovery session dosing

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effort::Urgency;
use crate::models::{clamp_score, ExperienceTier, MuscleGroup, VolumeStatus, WeeklyReport};
use crate::state::TrainingState;

// ---------------------------------------------------------------------------
/// High Fatigue Detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueAssessment {
    /// Pump + disruption
    pub stimulus: i32,
    /// Soreness + joint ache, plus 2 when performance dropped
    pub fatigue: i32,
    /// Stimulus-to-fatigue ratio
    pub sfr: f64,
    pub strength_drop: bool,
    pub is_high_fatigue: bool,
}

pub fn assess_fatigue(muscle: MuscleGroup, report: &WeeklyReport, state: &TrainingState) -> FatigueAssessment {
    let performance_penalty = if report.perf_change < 0 { 2 } else { 0 };
    let fatigue = clamp_score(report.soreness) + clamp_score(report.joint_ache) + performance_penalty;
    let stimulus = clamp_score(report.stimulus.pump) + clamp_score(report.stimulus.disruption);

    let divisor = if fatigue == 0 { 1 } else { fatigue };
    let sfr = f64::from(stimulus) / f64::from(divisor);

    let strength_drop = report
        .last_load
        .map(|load| state.rep_strength_drop(muscle, load))
        .unwrap_or(false);

    let is_high_fatigue = sfr <= 1.0 || strength_drop;
    debug!(%muscle, sfr, strength_drop, is_high_fatigue, "Fatigue assessed");

    FatigueAssessment {
        stimulus,
        fatigue,
        sfr,
        strength_drop,
        is_high_fatigue,
    }
}

/// SFR at or below 1, or a reported load more than 3% under baseline
pub fn is_high_fatigue(muscle: MuscleGroup, report: &WeeklyReport, state: &TrainingState) -> bool {
    assess_fatigue(muscle, report, state).is_high_fatigue
}

// ---------------------------------------------------------------------------
/// Frequency Analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyAction {
    IncreaseFrequency,
    DecreaseFrequency,
    Maintain,
    ImproveRecovery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyAnalysis {
    pub soreness_recovery_days: f64,
    pub current_session_gap: f64,
    /// Rounded to 0.01
    pub recovery_ratio: f64,
    pub recommendation: String,
    pub action: FrequencyAction,
    pub frequency_adjustment: i32,
    pub urgency: Urgency,
    pub muscle: Option<MuscleGroup>,
}

/// Compare days-until-recovered with days between sessions
pub fn analyze_frequency(
    soreness_recovery_days: f64,
    session_gap_days: f64,
    muscle: Option<MuscleGroup>,
    state: &TrainingState,
) -> FrequencyAnalysis {
    let recovery = soreness_recovery_days.max(0.0);
    let gap = session_gap_days.max(1.0);
    let ratio = recovery / gap;

    let (mut recommendation, mut action, mut adjustment, urgency) = if ratio < 0.7 {
        (
            "You heal early - add one session per week",
            FrequencyAction::IncreaseFrequency,
            1,
            Urgency::Medium,
        )
    } else if ratio > 1.3 {
        (
            "Recovery lags - insert an extra rest day",
            FrequencyAction::DecreaseFrequency,
            -1,
            Urgency::High,
        )
    } else {
        ("Frequency is optimal", FrequencyAction::Maintain, 0, Urgency::Normal)
    };

    if let Some(muscle) = muscle {
        let status = state.volume_status(muscle);

        if status == VolumeStatus::Maximum && action == FrequencyAction::IncreaseFrequency {
            recommendation = "At MRV - maintain frequency despite early recovery";
            action = FrequencyAction::Maintain;
            adjustment = 0;
        }

        if status == VolumeStatus::UnderMinimum && action == FrequencyAction::DecreaseFrequency {
            recommendation = "Below MV - consider recovery methods instead of reducing frequency";
            action = FrequencyAction::ImproveRecovery;
            adjustment = 0;
        }
    }

    FrequencyAnalysis {
        soreness_recovery_days: recovery,
        current_session_gap: gap,
        recovery_ratio: (ratio * 100.0).round() / 100.0,
        recommendation: recommendation.to_string(),
        action,
        frequency_adjustment: adjustment,
        urgency,
        muscle,
    }
}

// ---------------------------------------------------------------------------
/// Optimal Frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryCapacity {
    Low,
    #[default]
    Normal,
    High,
}

impl RecoveryCapacity {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Low => 0.8,
            Self::Normal => 1.0,
            Self::High => 1.2,
        }
    }
}

impl std::fmt::Display for RecoveryCapacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
        }
    }
}

impl ExperienceTier {
    /// Sessions per week (min, max) by training age
    pub fn frequency_band(&self) -> (u32, u32) {
        match self {
            Self::Beginner => (2, 3),
            Self::Intermediate => (2, 4),
            Self::Advanced => (3, 5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyOptions {
    pub available_days: u32,
    /// Weekly sets to plan for; the muscle's current sets when `None`
    pub current_volume: Option<u32>,
    pub recovery_capacity: RecoveryCapacity,
    pub training_age: ExperienceTier,
}

impl Default for FrequencyOptions {
    fn default() -> Self {
        Self {
            available_days: 6,
            current_volume: None,
            recovery_capacity: RecoveryCapacity::Normal,
            training_age: ExperienceTier::Intermediate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyAlternatives {
    pub conservative: u32,
    pub aggressive: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalFrequency {
    pub muscle: MuscleGroup,
    pub recommended_frequency: u32,
    pub sets_per_session: u32,
    pub total_volume: u32,
    pub reasoning: Vec<String>,
    pub alternatives: FrequencyAlternatives,
}

pub fn calculate_optimal_frequency(
    muscle: MuscleGroup,
    options: &FrequencyOptions,
    state: &TrainingState,
) -> OptimalFrequency {
    let volume = options.current_volume.unwrap_or_else(|| state.weekly_sets(muscle));
    let l = state.landmarks(muscle);

    let volume_frequency = if volume >= l.mav {
        volume.div_ceil(6).min(4)
    } else if volume >= l.mev {
        volume.div_ceil(8).min(3)
    } else {
        volume.div_ceil(10).max(2)
    };

    let adjusted = (f64::from(volume_frequency) * options.recovery_capacity.multiplier()).round() as u32;
    let (age_min, age_max) = options.training_age.frequency_band();
    let recommended = adjusted.min(age_max).min(options.available_days).max(age_min);

    OptimalFrequency {
        muscle,
        recommended_frequency: recommended,
        sets_per_session: volume.div_ceil(recommended),
        total_volume: volume,
        reasoning: vec![
            format!("{} weekly sets", volume),
            format!("{} recovery capacity", options.recovery_capacity),
            format!("{} training age", options.training_age),
            format!("{} available days", options.available_days),
        ],
        alternatives: FrequencyAlternatives {
            conservative: recommended.saturating_sub(1).max(2),
            aggressive: (recommended + 1).min(options.available_days),
        },
    }
}

// ---------------------------------------------------------------------------
/// Fatigue Accumulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueMetrics {
    /// 0..=3
    pub average_soreness: f64,
    /// 1..=10
    pub sleep_quality: f64,
    /// 1..=10
    pub stress_level: f64,
    pub muscles_needing_recovery: u32,
    pub consecutive_mrv_weeks: u32,
    pub performance_decline: bool,
}

impl Default for FatigueMetrics {
    fn default() -> Self {
        Self {
            average_soreness: 1.0,
            sleep_quality: 7.0,
            stress_level: 5.0,
            muscles_needing_recovery: 0,
            consecutive_mrv_weeks: 0,
            performance_decline: false,
        }
    }
}

impl FatigueMetrics {
    /// Defaults with the counters taken from training state
    pub fn from_state(state: &TrainingState) -> Self {
        Self {
            muscles_needing_recovery: state.total_muscles_needing_recovery,
            consecutive_mrv_weeks: state.consecutive_mrv_weeks,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
    Low,
    Moderate,
    High,
    Excessive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadUrgency {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueBreakdown {
    pub soreness: f64,
    pub sleep: f64,
    pub stress: f64,
    pub volume: f64,
    pub consecutive: f64,
    pub performance: f64,
}

impl FatigueBreakdown {
    pub fn total(&self) -> f64 {
        self.soreness + self.sleep + self.stress + self.volume + self.consecutive + self.performance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueAccumulation {
    /// 0..=100
    pub fatigue_score: u32,
    pub fatigue_level: FatigueLevel,
    pub recommendations: Vec<String>,
    pub deload_urgency: DeloadUrgency,
    pub breakdown: FatigueBreakdown,
}

pub fn assess_fatigue_accumulation(metrics: &FatigueMetrics) -> FatigueAccumulation {
    let muscle_count = MuscleGroup::ALL.len() as f64;
    let breakdown = FatigueBreakdown {
        soreness: (metrics.average_soreness / 3.0 * 30.0).min(30.0),
        sleep: (20.0 - metrics.sleep_quality / 10.0 * 20.0).max(0.0),
        stress: metrics.stress_level / 10.0 * 20.0,
        volume: (f64::from(metrics.muscles_needing_recovery) / muscle_count * 20.0).min(20.0),
        consecutive: (f64::from(metrics.consecutive_mrv_weeks) * 5.0).min(10.0),
        performance: if metrics.performance_decline { 10.0 } else { 0.0 },
    };
    let score = breakdown.total().clamp(0.0, 100.0);

    let (fatigue_level, deload_urgency, recommendations) = if score <= 25.0 {
        (
            FatigueLevel::Low,
            DeloadUrgency::None,
            vec!["Continue current program", "Consider volume progression opportunities"],
        )
    } else if score <= 50.0 {
        (
            FatigueLevel::Moderate,
            DeloadUrgency::Low,
            vec!["Monitor recovery closely", "Ensure adequate sleep and nutrition"],
        )
    } else if score <= 75.0 {
        (
            FatigueLevel::High,
            DeloadUrgency::Medium,
            vec![
                "Reduce training stress",
                "Consider recovery week",
                "Prioritize sleep and stress management",
            ],
        )
    } else {
        (
            FatigueLevel::Excessive,
            DeloadUrgency::High,
            vec![
                "Implement deload immediately",
                "Address sleep and lifestyle factors",
                "Consider extending deload period",
            ],
        )
    };

    FatigueAccumulation {
        fatigue_score: score.round() as u32,
        fatigue_level,
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        deload_urgency,
        breakdown,
    }
}

// ---------------------------------------------------------------------------
/// Recovery Session Plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryType {
    /// Reduced-volume session
    #[default]
    Volume,
    /// Full deload protocol
    Deload,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryOptions {
    pub has_illness: bool,
    /// 0..=3
    pub soreness_level: i32,
    /// RIR achieved in the last session, when known
    pub last_session_rir: Option<f64>,
    pub recovery_type: RecoveryType,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            has_illness: false,
            soreness_level: 2,
            last_session_rir: None,
            recovery_type: RecoveryType::Volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryPlan {
    pub muscle: MuscleGroup,
    pub recovery_type: RecoveryType,
    pub sets: u32,
    pub intensity: String,
    pub rir_target: String,
    pub duration: String,
    pub notes: Vec<String>,
}

fn scale_sets(sets: u32, factor: f64) -> u32 {
    (f64::from(sets) * factor).round() as u32
}

pub fn recovery_session_plan(muscle: MuscleGroup, options: &RecoveryOptions, state: &TrainingState) -> RecoveryPlan {
    let mut plan = RecoveryPlan {
        muscle,
        recovery_type: options.recovery_type,
        sets: state.recovery_volume(muscle, options.has_illness),
        intensity: "60-70% of normal".to_string(),
        rir_target: "3-4 RIR".to_string(),
        duration: "1 session".to_string(),
        notes: Vec::new(),
    };

    if options.soreness_level >= 3 {
        plan.sets = scale_sets(plan.sets, 0.7);
        plan.intensity = "50-60% of normal".to_string();
        plan.rir_target = "4-5 RIR".to_string();
        plan.notes.push("High soreness - very light session".to_string());
    }

    if options.has_illness {
        plan.sets = scale_sets(plan.sets, 0.8);
        plan.intensity = "40-50% of normal".to_string();
        plan.notes.push("Illness present - prioritize rest".to_string());
    }

    if options.last_session_rir.is_some_and(|rir| rir <= 0.5) {
        plan.sets = scale_sets(plan.sets, 0.8);
        plan.notes.push("Last session was very intense".to_string());
    }

    if options.recovery_type == RecoveryType::Deload {
        plan.sets = scale_sets(state.landmarks(muscle).mev, 0.5);
        plan.intensity = "40-50% of normal".to_string();
        plan.duration = "3-7 days".to_string();
        plan.notes.push("Full deload protocol".to_string());
    }

    plan
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
