use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Muscle groups tracked by the engine. Order is the iteration order used
/// by every per-muscle loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
  Chest,
  Back,
  Quads,
  Hamstrings,
  Shoulders,
  Biceps,
  Triceps,
  Calves,
  Abs,
  Forearms,
  Neck,
  Traps,
}

/// Muscles whose MRV breach counts toward the fatigue-based deload trigger
pub const MAJOR_MUSCLES: [MuscleGroup; 4] = [
  MuscleGroup::Chest,
  MuscleGroup::Back,
  MuscleGroup::Quads,
  MuscleGroup::Shoulders,
];

impl MuscleGroup {
  pub const ALL: [MuscleGroup; 12] = [
    MuscleGroup::Chest,
    MuscleGroup::Back,
    MuscleGroup::Quads,
    MuscleGroup::Hamstrings,
    MuscleGroup::Shoulders,
    MuscleGroup::Biceps,
    MuscleGroup::Triceps,
    MuscleGroup::Calves,
    MuscleGroup::Abs,
    MuscleGroup::Forearms,
    MuscleGroup::Neck,
    MuscleGroup::Traps,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      MuscleGroup::Chest => "Chest",
      MuscleGroup::Back => "Back",
      MuscleGroup::Quads => "Quads",
      MuscleGroup::Hamstrings => "Hamstrings",
      MuscleGroup::Shoulders => "Shoulders",
      MuscleGroup::Biceps => "Biceps",
      MuscleGroup::Triceps => "Triceps",
      MuscleGroup::Calves => "Calves",
      MuscleGroup::Abs => "Abs",
      MuscleGroup::Forearms => "Forearms",
      MuscleGroup::Neck => "Neck",
      MuscleGroup::Traps => "Traps",
    }
  }

  pub fn is_major(&self) -> bool {
    MAJOR_MUSCLES.contains(self)
  }
}

impl std::fmt::Display for MuscleGroup {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for MuscleGroup {
  type Err = EngineError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    MuscleGroup::ALL
      .into_iter()
      .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| EngineError::UnknownMuscle(s.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_is_case_insensitive() {
    assert_eq!("chest".parse::<MuscleGroup>().unwrap(), MuscleGroup::Chest);
    assert_eq!(" TRAPS ".parse::<MuscleGroup>().unwrap(), MuscleGroup::Traps);
  }

  #[test]
  fn test_parse_unknown_muscle_fails_loudly() {
    let err = "Glutes".parse::<MuscleGroup>().unwrap_err();
    assert_eq!(err.to_string(), "Unknown muscle group: Glutes");
  }

  #[test]
  fn test_display_matches_as_str() {
    for muscle in MuscleGroup::ALL {
      assert_eq!(muscle.to_string(), muscle.as_str());
    }
  }

  #[test]
  fn test_major_subset() {
    assert!(MuscleGroup::Quads.is_major());
    assert!(!MuscleGroup::Hamstrings.is_major());
  }
}
