use thiserror::Error;

use crate::store::StoreError;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum EngineError {
  /// Landmarks are mandatory for every computation, so a miss fails loudly
  #[error("Unknown muscle group: {0}")]
  UnknownMuscle(String),

  #[error("Storage error: {0}")]
  Store(#[from] StoreError),
}
