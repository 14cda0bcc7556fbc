//! Landmark, preset and baseline commands

use std::collections::BTreeMap;

use tracing::info;

use crate::commands::save_training_state;
use crate::error::EngineError;
use crate::models::{ExperienceTier, LandmarkUpdate, MuscleGroup, VolumeLandmarks};
use crate::state::{StateSummary, TrainingState};
use crate::store::StateStore;

/// Partial landmark write for a muscle given by name, then save
pub async fn update_landmarks<S: StateStore>(
  store: &S,
  state: &mut TrainingState,
  muscle: &str,
  update: LandmarkUpdate,
) -> Result<VolumeLandmarks, EngineError> {
  let muscle: MuscleGroup = muscle.parse()?;
  state.update_volume_landmarks(muscle, &update);
  save_training_state(store, state).await?;
  Ok(state.landmarks(muscle))
}

/// Scale the default landmarks of `muscles` (all muscles when empty) by the
/// tier multiplier and write them back
pub async fn apply_experience_preset<S: StateStore>(
  store: &S,
  state: &mut TrainingState,
  tier: ExperienceTier,
  muscles: &[MuscleGroup],
) -> Result<BTreeMap<MuscleGroup, VolumeLandmarks>, EngineError> {
  let targets: Vec<MuscleGroup> = if muscles.is_empty() {
    MuscleGroup::ALL.to_vec()
  } else {
    muscles.to_vec()
  };

  let applied: BTreeMap<MuscleGroup, VolumeLandmarks> = targets
    .into_iter()
    .map(|muscle| {
      let scaled = tier.scale(&VolumeLandmarks::default_for(muscle));
      state.update_volume_landmarks(muscle, &scaled.into());
      (muscle, scaled)
    })
    .collect();

  save_training_state(store, state).await?;
  info!(%tier, muscles = applied.len(), "Experience preset applied");
  Ok(applied)
}

/// Record a reference load used to detect strength regressions
pub async fn record_baseline_strength<S: StateStore>(
  store: &S,
  state: &mut TrainingState,
  muscle: &str,
  load: f64,
) -> Result<(), EngineError> {
  let muscle: MuscleGroup = muscle.parse()?;
  state.set_baseline_strength(muscle, load.max(0.0));
  save_training_state(store, state).await
}

/// Change mesocycle length (minimum 1 week), then save
pub async fn set_meso_length<S: StateStore>(
  store: &S,
  state: &mut TrainingState,
  meso_len: u32,
) -> Result<StateSummary, EngineError> {
  state.set_meso_length(meso_len);
  save_training_state(store, state).await?;
  Ok(state.summary())
}
