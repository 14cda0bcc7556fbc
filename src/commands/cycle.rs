//! Weekly cycle commands

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::effort::{process_weekly_load_adjustments, LoadAdjustmentPlan};
use crate::error::EngineError;
use crate::models::{parse_reports, LoadReport, MuscleGroup, WeeklyReport};
use crate::state::{StateSummary, TrainingState};
use crate::store::{CycleRecord, StateStore};
use crate::volume::{process_weekly_volume_progression, WeeklyProgression};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyCycleOutcome {
  pub progression: WeeklyProgression,
  /// False when a deload was just triggered; the deload week comes next
  pub advanced: bool,
  pub summary: StateSummary,
  /// Muscles whose reports were not progressed because the week was a deload
  #[serde(default)]
  pub ignored_reports: Vec<MuscleGroup>,
}

/// Process one week of reports, advance the mesocycle, then save and log.
///
/// A run that starts in a deload week completes the deload instead: the
/// reports are not progressed and come back in `ignored_reports`, the week
/// advances and sets return to MEV.
pub async fn run_weekly_cycle<S: StateStore>(
  store: &S,
  state: &mut TrainingState,
  reports: &BTreeMap<MuscleGroup, WeeklyReport>,
) -> Result<WeeklyCycleOutcome, EngineError> {
  let block_no = state.block_no;
  let week_no = state.week_no;

  let mut ignored_reports = Vec::new();
  let (progression, advanced) = if state.deload_phase {
    ignored_reports = reports.keys().copied().collect();
    if !ignored_reports.is_empty() {
      debug!(ignored = ?ignored_reports, "Reports ignored during deload week");
    }
    state.next_week();
    state.reset_week();
    info!(week = state.week_no, block = state.block_no, "Deload week complete");
    (
      WeeklyProgression {
        progression_log: BTreeMap::new(),
        deload_triggered: false,
        mrv_hits: 0,
        recommendation: "Deload complete - resume progression at MEV".to_string(),
      },
      true,
    )
  } else {
    let progression = process_weekly_volume_progression(reports, state);
    let advanced = !progression.deload_triggered;
    if advanced {
      state.next_week();
    }
    (progression, advanced)
  };

  store.save(&state.snapshot()).await?;
  store
    .record_cycle(&CycleRecord::new(block_no, week_no, progression.clone()))
    .await?;

  Ok(WeeklyCycleOutcome {
    progression,
    advanced,
    summary: state.summary(),
    ignored_reports,
  })
}

/// Name-keyed variant: every muscle name is validated before any mutation
pub async fn run_weekly_cycle_named<S: StateStore>(
  store: &S,
  state: &mut TrainingState,
  reports: HashMap<String, WeeklyReport>,
) -> Result<WeeklyCycleOutcome, EngineError> {
  let reports = parse_reports(reports)?;
  run_weekly_cycle(store, state, &reports).await
}

/// Next week's load changes from this week's reported RIR. Read-only.
pub fn plan_load_adjustments(
  state: &TrainingState,
  reports: HashMap<String, LoadReport>,
) -> Result<LoadAdjustmentPlan, EngineError> {
  let reports = parse_reports(reports)?;
  Ok(process_weekly_load_adjustments(state, &reports))
}
