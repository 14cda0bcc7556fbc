//! Save points: each command pairs an engine mutation with persistence

pub mod cycle;
pub mod landmarks;

use tracing::{info, warn};

use crate::error::EngineError;
use crate::state::{StateSummary, TrainingState};
use crate::store::StateStore;

/// Load persisted state, falling back to a fresh state on a missing,
/// unreadable or corrupt snapshot
pub async fn load_training_state<S: StateStore>(store: &S, default_meso_len: u32) -> TrainingState {
  match store.load().await {
    Ok(Some(snapshot)) => {
      let state = TrainingState::from_snapshot(snapshot);
      info!(week = state.week_no, block = state.block_no, "Training state loaded");
      state
    }
    Ok(None) => {
      info!("No saved training state, starting fresh");
      TrainingState::with_meso_length(default_meso_len)
    }
    Err(e) => {
      warn!(error = %e, "Failed to load training state, using defaults");
      TrainingState::with_meso_length(default_meso_len)
    }
  }
}

pub async fn save_training_state<S: StateStore>(store: &S, state: &TrainingState) -> Result<(), EngineError> {
  store.save(&state.snapshot()).await?;
  Ok(())
}

/// Leave deload/resensitization and save
pub async fn resume_accumulation<S: StateStore>(
  store: &S,
  state: &mut TrainingState,
) -> Result<StateSummary, EngineError> {
  state.resume_accumulation();
  save_training_state(store, state).await?;
  Ok(state.summary())
}

/// Drop every muscle to MV and save. Returns false (and changes nothing)
/// when the current block is not a resensitization block.
pub async fn start_resensitization_if_due<S: StateStore>(
  store: &S,
  state: &mut TrainingState,
) -> Result<bool, EngineError> {
  if !state.should_resensitize() {
    return Ok(false);
  }
  state.start_resensitization();
  save_training_state(store, state).await?;
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::MuscleGroup;
  use crate::state::TrainingPhase;
  use crate::store::MemoryStateStore;
  use crate::test_utils::FailingStore;

  #[tokio::test]
  async fn test_load_from_empty_store_uses_meso_length() {
    let store = MemoryStateStore::new();
    let state = load_training_state(&store, 6).await;
    assert_eq!(state.meso_len, 6);
    assert_eq!(state.week_no, 1);
  }

  #[tokio::test]
  async fn test_load_corrupt_snapshot_falls_back_to_defaults() {
    let store = MemoryStateStore::with_raw_json("{\"weekNo\": \"three\"");
    let state = load_training_state(&store, 4).await;
    assert_eq!(state, TrainingState::with_meso_length(4));
  }

  #[tokio::test]
  async fn test_load_error_falls_back_to_defaults() {
    let state = load_training_state(&FailingStore, 5).await;
    assert_eq!(state, TrainingState::with_meso_length(5));
  }

  #[tokio::test]
  async fn test_load_restores_saved_state() {
    let store = MemoryStateStore::new();
    let mut state = TrainingState::new();
    state.update_weekly_sets(MuscleGroup::Back, 17);
    state.next_week();
    save_training_state(&store, &state).await.unwrap();

    let loaded = load_training_state(&store, 4).await;
    assert_eq!(loaded, state);
  }

  #[tokio::test]
  async fn test_resume_accumulation_saves() {
    let store = MemoryStateStore::new();
    let mut state = TrainingState::new();
    state.start_deload();

    let summary = resume_accumulation(&store, &mut state).await.unwrap();
    assert_eq!(summary.current_phase, TrainingPhase::Accumulation);

    let saved = store.load().await.unwrap().unwrap();
    assert!(!saved.deload_phase);
    assert_eq!(saved.load_reduction, 1.0);
  }

  #[tokio::test]
  async fn test_resensitization_only_on_fourth_block() {
    let store = MemoryStateStore::new();
    let mut state = TrainingState::new();
    assert!(!start_resensitization_if_due(&store, &mut state).await.unwrap());
    assert!(store.load().await.unwrap().is_none());

    state.block_no = 4;
    assert!(start_resensitization_if_due(&store, &mut state).await.unwrap());
    assert_eq!(state.weekly_sets(MuscleGroup::Chest), 4);
    assert!(store.load().await.unwrap().unwrap().resensitization_phase);
  }
}
