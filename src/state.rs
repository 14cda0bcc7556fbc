//! Training State
//!
//! The single mutable source of truth for the engine:
//! - per-muscle volume landmarks (MV / MEV / MAV / MRV)
//! - current and last week's set counts
//! - mesocycle position (week, meso length, block)
//! - deload / resensitization phase flags
//! - weekly fatigue counters and baseline strength
//!
//! Mutators only change memory. Persisting a `TrainingSnapshot` is the
//! caller's decision (see `commands`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::effort::{linear_target_rir, round_to_half};
use crate::error::EngineError;
use crate::models::{LandmarkUpdate, MuscleGroup, VolumeLandmarks, VolumeStatus, MAJOR_MUSCLES};

/// RIR at the first week of a mesocycle
pub const START_RIR: f64 = 3.0;
/// RIR at the final week of a mesocycle
pub const END_RIR: f64 = 0.5;
/// A last load below this fraction of baseline counts as a strength regression
pub const STRENGTH_DROP_THRESHOLD: f64 = 0.97;
/// Deload volume as a fraction of MEV
pub const DELOAD_MEV_FRACTION: f64 = 0.5;

const DEFAULT_MESO_LENGTH: u32 = 4;
const DEFAULT_BASELINE_LOAD: f64 = 100.0;
const RESENSITIZATION_BLOCK_INTERVAL: u32 = 4;
/// Blocks after which deep deloads run two weeks
const LONG_HISTORY_BLOCKS: u32 = 20;

// ---------------------------------------------------------------------------
/// Training Phase: macro-phase of the current week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Normal volume accumulation
    #[default]
    Accumulation,
    Deload,
    Resensitization,
}

impl std::fmt::Display for TrainingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accumulation => write!(f, "accumulation"),
            Self::Deload => write!(f, "deload"),
            Self::Resensitization => write!(f, "resensitization"),
        }
    }
}

// ---------------------------------------------------------------------------
/// Training State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingState {
    pub volume_landmarks: BTreeMap<MuscleGroup, VolumeLandmarks>,
    pub week_no: u32,
    pub meso_len: u32,
    pub block_no: u32,
    pub deload_phase: bool,
    pub resensitization_phase: bool,
    /// Multiplier applied to working loads (0.5 while deloading)
    pub load_reduction: f64,
    pub current_week_sets: BTreeMap<MuscleGroup, u32>,
    pub last_week_sets: BTreeMap<MuscleGroup, u32>,
    pub baseline_strength: BTreeMap<MuscleGroup, f64>,
    pub consecutive_mrv_weeks: u32,
    pub recovery_sessions_this_week: u32,
    pub total_muscles_needing_recovery: u32,
}

impl Default for TrainingState {
    fn default() -> Self {
        let volume_landmarks: BTreeMap<_, _> = MuscleGroup::ALL
            .into_iter()
            .map(|m| (m, VolumeLandmarks::default_for(m)))
            .collect();
        let at_mev: BTreeMap<_, _> = volume_landmarks.iter().map(|(m, l)| (*m, l.mev)).collect();

        Self {
            volume_landmarks,
            week_no: 1,
            meso_len: DEFAULT_MESO_LENGTH,
            block_no: 1,
            deload_phase: false,
            resensitization_phase: false,
            load_reduction: 1.0,
            current_week_sets: at_mev.clone(),
            last_week_sets: at_mev,
            baseline_strength: MuscleGroup::ALL
                .into_iter()
                .map(|m| (m, DEFAULT_BASELINE_LOAD))
                .collect(),
            consecutive_mrv_weeks: 0,
            recovery_sessions_this_week: 0,
            total_muscles_needing_recovery: 0,
        }
    }
}

impl TrainingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state with a custom mesocycle length
    pub fn with_meso_length(meso_len: u32) -> Self {
        let mut state = Self::default();
        state.set_meso_length(meso_len);
        state
    }

    /// Overlay a persisted snapshot onto defaults. Per-muscle maps merge, so
    /// every muscle keeps an entry even if the snapshot omits it.
    pub fn from_snapshot(snapshot: TrainingSnapshot) -> Self {
        let mut state = Self::default();

        state.volume_landmarks.extend(snapshot.volume_landmarks);
        state.current_week_sets.extend(snapshot.current_week_sets);
        state.last_week_sets.extend(snapshot.last_week_sets);
        state.baseline_strength.extend(snapshot.baseline_strength);

        state.meso_len = snapshot.meso_len.max(1);
        state.block_no = snapshot.block_no.max(1);
        state.week_no = snapshot.week_no.clamp(1, state.meso_len);
        if state.week_no != snapshot.week_no || state.meso_len != snapshot.meso_len {
            warn!(
                week = snapshot.week_no,
                meso = snapshot.meso_len,
                "Snapshot mesocycle position out of range, clamped"
            );
        }

        state.deload_phase = snapshot.deload_phase;
        state.resensitization_phase = snapshot.resensitization_phase;
        state.load_reduction = snapshot.load_reduction;
        state.consecutive_mrv_weeks = snapshot.consecutive_mrv_weeks;
        state.recovery_sessions_this_week = snapshot.recovery_sessions_this_week;
        state.total_muscles_needing_recovery = snapshot.total_muscles_needing_recovery;

        state
    }

    /// Full persisted shape of this state
    pub fn snapshot(&self) -> TrainingSnapshot {
        TrainingSnapshot {
            volume_landmarks: self.volume_landmarks.clone(),
            week_no: self.week_no,
            meso_len: self.meso_len,
            block_no: self.block_no,
            deload_phase: self.deload_phase,
            resensitization_phase: self.resensitization_phase,
            current_week_sets: self.current_week_sets.clone(),
            last_week_sets: self.last_week_sets.clone(),
            consecutive_mrv_weeks: self.consecutive_mrv_weeks,
            recovery_sessions_this_week: self.recovery_sessions_this_week,
            total_muscles_needing_recovery: self.total_muscles_needing_recovery,
            load_reduction: self.load_reduction,
            baseline_strength: self.baseline_strength.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn landmarks(&self, muscle: MuscleGroup) -> VolumeLandmarks {
        self.volume_landmarks
            .get(&muscle)
            .copied()
            .unwrap_or_else(|| VolumeLandmarks::default_for(muscle))
    }

    /// Landmark lookup by name; unknown names are an error
    pub fn landmarks_by_name(&self, name: &str) -> Result<VolumeLandmarks, EngineError> {
        let muscle: MuscleGroup = name.parse()?;
        Ok(self.landmarks(muscle))
    }

    pub fn weekly_sets(&self, muscle: MuscleGroup) -> u32 {
        self.current_week_sets
            .get(&muscle)
            .copied()
            .unwrap_or_else(|| self.landmarks(muscle).mev)
    }

    pub fn last_week_sets(&self, muscle: MuscleGroup) -> u32 {
        self.last_week_sets
            .get(&muscle)
            .copied()
            .unwrap_or_else(|| self.landmarks(muscle).mev)
    }

    pub fn baseline_strength(&self, muscle: MuscleGroup) -> Option<f64> {
        self.baseline_strength.get(&muscle).copied()
    }

    /// Target RIR, interpolated linearly from 3 at week 1 to 0.5 at the
    /// final week. A one-week mesocycle has no slope and stays at 3.
    pub fn target_rir(&self) -> f64 {
        linear_target_rir(self.week_no, self.meso_len)
    }

    /// Zone of the muscle's current weekly sets
    pub fn volume_status(&self, muscle: MuscleGroup) -> VolumeStatus {
        self.volume_status_at(muscle, self.weekly_sets(muscle))
    }

    /// Zone of an arbitrary set count against the muscle's landmarks
    pub fn volume_status_at(&self, muscle: MuscleGroup, sets: u32) -> VolumeStatus {
        self.landmarks(muscle).status(sets)
    }

    pub fn is_at_mrv(&self, muscle: MuscleGroup) -> bool {
        self.weekly_sets(muscle) >= self.landmarks(muscle).mrv
    }

    pub fn current_phase(&self) -> TrainingPhase {
        if self.deload_phase {
            TrainingPhase::Deload
        } else if self.resensitization_phase {
            TrainingPhase::Resensitization
        } else {
            TrainingPhase::Accumulation
        }
    }

    /// Any of four independent triggers
    pub fn should_deload(&self) -> bool {
        if self.consecutive_mrv_weeks >= 2 {
            return true;
        }

        if self.total_muscles_needing_recovery >= recovery_majority() {
            return true;
        }

        let major_at_mrv = MAJOR_MUSCLES.iter().any(|m| self.is_at_mrv(*m));
        if major_at_mrv && self.total_muscles_needing_recovery > 0 {
            return true;
        }

        self.week_no >= self.meso_len
    }

    /// Deload decision with the reasons behind it
    pub fn deload_analysis(&self) -> DeloadAnalysis {
        let mrv_breaches: Vec<MuscleGroup> = MuscleGroup::ALL
            .into_iter()
            .filter(|m| self.volume_status(*m) == VolumeStatus::Maximum)
            .collect();

        let mut reasons = Vec::new();
        if self.consecutive_mrv_weeks >= 2 {
            reasons.push("Two consecutive weeks at MRV".to_string());
        }
        if self.total_muscles_needing_recovery >= recovery_majority() {
            reasons.push("Most muscles need recovery sessions".to_string());
        }
        if self.total_muscles_needing_recovery > 0 && mrv_breaches.iter().any(|m| m.is_major()) {
            reasons.push("Major muscle group at MRV while fatigued".to_string());
        }
        if self.week_no >= self.meso_len {
            reasons.push("End of mesocycle reached".to_string());
        }
        if mrv_breaches.len() >= MuscleGroup::ALL.len().div_ceil(3) {
            reasons.push(format!("{} muscle groups at/above MRV", mrv_breaches.len()));
        }

        DeloadAnalysis {
            should_deload: self.should_deload(),
            reasons,
            mrv_breaches,
            consecutive_mrv_weeks: self.consecutive_mrv_weeks,
            current_week: self.week_no,
            meso_length: self.meso_len,
            muscles_needing_recovery: self.total_muscles_needing_recovery,
        }
    }

    /// Overall fatigue on 0..=1: mean MRV proximity across muscles, plus
    /// penalties for consecutive MRV weeks (up to 0.4) and muscles needing
    /// recovery (up to 0.3)
    pub fn overall_fatigue(&self) -> f64 {
        let muscle_count = MuscleGroup::ALL.len() as f64;
        let proximity: f64 = MuscleGroup::ALL
            .into_iter()
            .map(|m| mrv_proximity(self.landmarks(m), self.weekly_sets(m)))
            .sum();

        let mrv_penalty = (f64::from(self.consecutive_mrv_weeks) * 0.2).min(0.4);
        let recovery_penalty = f64::from(self.total_muscles_needing_recovery) / muscle_count * 0.3;

        (proximity / muscle_count + mrv_penalty + recovery_penalty).min(1.0)
    }

    /// Fraction of muscles at or within 2 sets of MRV
    pub fn volume_pressure(&self) -> f64 {
        let near_mrv = MuscleGroup::ALL
            .into_iter()
            .filter(|m| self.weekly_sets(*m) >= self.landmarks(*m).mrv.saturating_sub(2))
            .count();
        near_mrv as f64 / MuscleGroup::ALL.len() as f64
    }

    /// Advisory deload depth from fatigue and volume pressure. Does not
    /// change state; `start_deload` always uses half of MEV.
    pub fn deload_strategy(&self) -> DeloadStrategy {
        let fatigue_level = self.overall_fatigue();
        let volume_pressure = self.volume_pressure();

        let deload_type = if fatigue_level >= 0.7 || volume_pressure >= 0.8 {
            DeloadType::Deep
        } else if fatigue_level >= 0.5 || volume_pressure >= 0.6 {
            DeloadType::Standard
        } else {
            DeloadType::Light
        };

        let (volume_reduction, load_reduction) = match deload_type {
            DeloadType::Deep => (0.4, 0.6),
            DeloadType::Standard => (0.5, 0.7),
            DeloadType::Light => (0.7, 0.8),
        };

        // Long training histories get a second deep-deload week
        let duration_weeks = if deload_type == DeloadType::Deep && self.block_no > LONG_HISTORY_BLOCKS {
            2
        } else {
            1
        };

        let fatigue_pct = (fatigue_level * 100.0).round();
        let volume_pct = (volume_pressure * 100.0).round();
        let recommendation = match deload_type {
            DeloadType::Deep => format!(
                "Deep deload recommended due to high fatigue ({}%) and volume pressure ({}%). Focus on recovery and technique work.",
                fatigue_pct, volume_pct
            ),
            DeloadType::Standard => format!(
                "Standard deload recommended with moderate fatigue ({}%) and volume pressure ({}%). Maintain movement patterns with reduced intensity.",
                fatigue_pct, volume_pct
            ),
            DeloadType::Light => format!(
                "Light deload recommended with manageable fatigue ({}%) and volume pressure ({}%). Brief recovery before resuming progression.",
                fatigue_pct, volume_pct
            ),
        };

        DeloadStrategy {
            deload_type,
            volume_reduction,
            load_reduction,
            duration_weeks,
            fatigue_level,
            volume_pressure,
            recommendation,
        }
    }

    /// Whether a deload is running or recommended, with a strategy when
    /// one is recommended
    pub fn deload_status(&self) -> DeloadStatus {
        if self.deload_phase {
            return DeloadStatus {
                active: true,
                recommended: false,
                strategy: None,
                load_reduction: self.load_reduction,
                message: format!(
                    "Deload in progress ({}% load)",
                    (self.load_reduction * 100.0).round()
                ),
            };
        }

        if self.should_deload() {
            DeloadStatus {
                active: false,
                recommended: true,
                strategy: Some(self.deload_strategy()),
                load_reduction: self.load_reduction,
                message: "Deload recommended - high fatigue or volume accumulation detected".to_string(),
            }
        } else {
            DeloadStatus {
                active: false,
                recommended: false,
                strategy: None,
                load_reduction: self.load_reduction,
                message: "Normal training progression".to_string(),
            }
        }
    }

    /// Advisory only: every fourth block
    pub fn should_resensitize(&self) -> bool {
        self.block_no % RESENSITIZATION_BLOCK_INTERVAL == 0
    }

    /// At least half of all muscles at or above MRV
    pub fn most_muscles_at_mrv(&self) -> bool {
        let at_mrv = MuscleGroup::ALL.into_iter().filter(|m| self.is_at_mrv(*m)).count();
        at_mrv >= MuscleGroup::ALL.len().div_ceil(2)
    }

    /// True if a baseline exists and `observed_load` is more than 3% below it
    pub fn rep_strength_drop(&self, muscle: MuscleGroup, observed_load: f64) -> bool {
        match self.baseline_strength(muscle) {
            Some(baseline) if baseline > 0.0 && observed_load > 0.0 => {
                observed_load < baseline * STRENGTH_DROP_THRESHOLD
            }
            _ => false,
        }
    }

    /// Floor for recovery-session dosing
    pub fn recovery_volume(&self, muscle: MuscleGroup, has_illness: bool) -> u32 {
        let l = self.landmarks(muscle);
        let midpoint = (f64::from(l.mev + l.mrv) / 2.0).round() as i64;
        let adjustment = if has_illness { 2 } else { 1 };
        let floor = (f64::from(l.mev) * 0.5).ceil() as i64;
        (midpoint - adjustment).max(floor).max(0) as u32
    }

    /// Read-only contract for dashboards
    pub fn summary(&self) -> StateSummary {
        StateSummary {
            week: self.week_no,
            meso: self.meso_len,
            block: self.block_no,
            target_rir: round_to_half(self.target_rir()),
            deload_recommended: self.should_deload(),
            resensitization_recommended: self.should_resensitize(),
            current_phase: self.current_phase(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Set this week's absolute set count (clamped at 0)
    pub fn update_weekly_sets(&mut self, muscle: MuscleGroup, sets: i32) {
        self.current_week_sets.insert(muscle, sets.max(0) as u32);
    }

    /// Add (or remove, when negative) sets this week, never going below 0
    pub fn add_sets(&mut self, muscle: MuscleGroup, delta: i32) {
        let current = i64::from(self.weekly_sets(muscle));
        let next = (current + i64::from(delta)).clamp(0, i64::from(u32::MAX));
        self.current_week_sets.insert(muscle, next as u32);
    }

    /// Record that a muscle needs recovery; also counts toward the
    /// consecutive-MRV counter when its sets are at MRV
    pub fn hit_mrv(&mut self, muscle: MuscleGroup) {
        self.total_muscles_needing_recovery += 1;
        if self.is_at_mrv(muscle) {
            self.consecutive_mrv_weeks += 1;
        }
        debug!(
            %muscle,
            needing_recovery = self.total_muscles_needing_recovery,
            consecutive_mrv_weeks = self.consecutive_mrv_weeks,
            "MRV hit recorded"
        );
    }

    /// Collapse every muscle to half its MEV
    pub fn start_deload(&mut self) {
        self.deload_phase = true;
        self.load_reduction = 0.5;
        for muscle in MuscleGroup::ALL {
            let mev = self.landmarks(muscle).mev;
            let deload_sets = (f64::from(mev) * DELOAD_MEV_FRACTION).round() as u32;
            self.current_week_sets.insert(muscle, deload_sets);
        }
        info!(week = self.week_no, block = self.block_no, "Deload started");
    }

    /// Drop every muscle to MV; caller decides when (see `should_resensitize`)
    pub fn start_resensitization(&mut self) {
        self.resensitization_phase = true;
        self.load_reduction = 1.0;
        for muscle in MuscleGroup::ALL {
            let mv = self.landmarks(muscle).mv;
            self.current_week_sets.insert(muscle, mv);
        }
        info!(block = self.block_no, "Resensitization started");
    }

    /// Leave deload or resensitization and return to accumulation
    pub fn resume_accumulation(&mut self) {
        self.deload_phase = false;
        self.resensitization_phase = false;
        self.load_reduction = 1.0;
    }

    /// Advance one week, wrapping into the next block after `meso_len`
    pub fn next_week(&mut self) {
        self.last_week_sets = self.current_week_sets.clone();

        let any_breach = MuscleGroup::ALL.into_iter().any(|m| self.is_at_mrv(m));
        if any_breach {
            self.consecutive_mrv_weeks += 1;
        } else {
            self.consecutive_mrv_weeks = 0;
        }

        self.week_no += 1;

        // A deload lasts one week
        if self.deload_phase {
            self.deload_phase = false;
            self.load_reduction = 1.0;
        }

        if self.week_no > self.meso_len {
            self.week_no = 1;
            self.block_no += 1;
            self.consecutive_mrv_weeks = 0;
            info!(block = self.block_no, "Mesocycle complete, starting new block");
        }

        self.recovery_sessions_this_week = 0;
        self.total_muscles_needing_recovery = 0;

        debug!(week = self.week_no, block = self.block_no, "Advanced to next week");
    }

    /// Put every muscle back at MEV for the current week
    pub fn reset_week(&mut self) {
        for muscle in MuscleGroup::ALL {
            self.initialize_muscle_at_mev(muscle);
        }
    }

    pub fn initialize_muscle_at_mev(&mut self, muscle: MuscleGroup) {
        let mev = self.landmarks(muscle).mev;
        self.current_week_sets.insert(muscle, mev);
    }

    pub fn set_baseline_strength(&mut self, muscle: MuscleGroup, load: f64) {
        self.baseline_strength.insert(muscle, load);
    }

    /// Partial landmark write. Ordering is not enforced.
    pub fn update_volume_landmarks(&mut self, muscle: MuscleGroup, update: &LandmarkUpdate) {
        let mut landmarks = self.landmarks(muscle);
        landmarks.apply(update);
        if !landmarks.is_ordered() {
            warn!(
                %muscle,
                mv = landmarks.mv,
                mev = landmarks.mev,
                mav = landmarks.mav,
                mrv = landmarks.mrv,
                "Landmarks written out of order"
            );
        }
        self.volume_landmarks.insert(muscle, landmarks);
    }

    /// Change mesocycle length (minimum 1), keeping the week in range
    pub fn set_meso_length(&mut self, meso_len: u32) {
        self.meso_len = meso_len.max(1);
        self.week_no = self.week_no.clamp(1, self.meso_len);
    }
}

/// Recovery count at which "most muscles need recovery"
fn recovery_majority() -> u32 {
    MuscleGroup::ALL.len().div_ceil(2) as u32
}

/// Position between MEV (0) and MRV (1), clamped. Collapsed landmarks
/// (MRV <= MEV) count as fully loaded once sets reach MRV.
fn mrv_proximity(landmarks: VolumeLandmarks, sets: u32) -> f64 {
    if landmarks.mrv <= landmarks.mev {
        return if sets >= landmarks.mrv { 1.0 } else { 0.0 };
    }
    let ratio = (f64::from(sets) - f64::from(landmarks.mev)) / f64::from(landmarks.mrv - landmarks.mev);
    ratio.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
/// Persisted Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingSnapshot {
    pub volume_landmarks: BTreeMap<MuscleGroup, VolumeLandmarks>,
    pub week_no: u32,
    pub meso_len: u32,
    pub block_no: u32,
    pub deload_phase: bool,
    pub resensitization_phase: bool,
    pub current_week_sets: BTreeMap<MuscleGroup, u32>,
    pub last_week_sets: BTreeMap<MuscleGroup, u32>,
    #[serde(rename = "consecutiveMRVWeeks")]
    pub consecutive_mrv_weeks: u32,
    pub recovery_sessions_this_week: u32,
    pub total_muscles_needing_recovery: u32,
    pub load_reduction: f64,
    pub baseline_strength: BTreeMap<MuscleGroup, f64>,
}

impl Default for TrainingSnapshot {
    fn default() -> Self {
        TrainingState::default().snapshot()
    }
}

impl TrainingSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
/// Exported Summary and Deload Analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub week: u32,
    pub meso: u32,
    pub block: u32,
    /// Rounded to the nearest 0.5
    #[serde(rename = "targetRIR")]
    pub target_rir: f64,
    pub deload_recommended: bool,
    pub resensitization_recommended: bool,
    pub current_phase: TrainingPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadAnalysis {
    pub should_deload: bool,
    pub reasons: Vec<String>,
    pub mrv_breaches: Vec<MuscleGroup>,
    pub consecutive_mrv_weeks: u32,
    pub current_week: u32,
    pub meso_length: u32,
    pub muscles_needing_recovery: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadType {
    Deep,
    Standard,
    Light,
}

impl std::fmt::Display for DeloadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deep => write!(f, "deep"),
            Self::Standard => write!(f, "standard"),
            Self::Light => write!(f, "light"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadStrategy {
    pub deload_type: DeloadType,
    /// Deload sets as a fraction of MEV
    pub volume_reduction: f64,
    /// Working loads as a fraction of normal
    pub load_reduction: f64,
    pub duration_weeks: u32,
    /// 0..=1
    pub fatigue_level: f64,
    /// 0..=1
    pub volume_pressure: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadStatus {
    pub active: bool,
    pub recommended: bool,
    pub strategy: Option<DeloadStrategy>,
    pub load_reduction: f64,
    pub message: String,
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
