use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::MuscleGroup;
use crate::error::EngineError;

/// Sub-scores and ordinal scales reported by the lifter live in 0..=3
pub const SCORE_MIN: i32 = 0;
pub const SCORE_MAX: i32 = 3;

/// Clamp a reported sub-score into 0..=3
pub fn clamp_score(value: i32) -> i32 {
  value.clamp(SCORE_MIN, SCORE_MAX)
}

/// Last session's stimulus quality ratings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusFeedback {
  /// Mind-muscle connection
  pub mmc: i32,
  pub pump: i32,
  pub disruption: i32,
}

impl StimulusFeedback {
  pub fn new(mmc: i32, pump: i32, disruption: i32) -> Self {
    Self { mmc, pump, disruption }
  }
}

/// Weekly stimulus/recovery report for one muscle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
  #[serde(default)]
  pub stimulus: StimulusFeedback,
  #[serde(default)]
  pub soreness: i32,
  #[serde(default)]
  pub joint_ache: i32,
  /// Performance versus last session: negative = worse
  #[serde(default)]
  pub perf_change: i32,
  /// Ordinal performance 0 (worse) ..= 3 (much better); derived from
  /// `perf_change` when absent
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub performance: Option<i32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_load: Option<f64>,
  #[serde(default)]
  pub recovery_session: bool,
  #[serde(default)]
  pub has_illness: bool,
}

impl WeeklyReport {
  /// Performance on the 0..=3 scale used by the set progression matrix
  pub fn performance_level(&self) -> i32 {
    clamp_score(self.performance.unwrap_or(self.perf_change.saturating_add(1)))
  }
}

/// Effort report used for load adjustments
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
  /// Mean RIR across the week's working sets; scheduled RIR when absent
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub average_rir: Option<f64>,
  /// Sign carries the trend: negative declining, positive improving
  #[serde(default)]
  pub performance_trend: i32,
}

/// Convert name-keyed reports, rejecting unknown muscles before anything
/// touches training state
pub fn parse_reports<T>(named: HashMap<String, T>) -> Result<BTreeMap<MuscleGroup, T>, EngineError> {
  named
    .into_iter()
    .map(|(name, report)| Ok((name.parse::<MuscleGroup>()?, report)))
    .collect()
}
