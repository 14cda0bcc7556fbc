use serde::{Deserialize, Serialize};

use super::MuscleGroup;

/// Weekly set landmarks for one muscle. Expected ordering is
/// MV <= MEV <= MAV <= MRV; writers are responsible for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct VolumeLandmarks {
  pub mv: u32,
  pub mev: u32,
  pub mav: u32,
  pub mrv: u32,
}

impl VolumeLandmarks {
  pub const fn new(mv: u32, mev: u32, mav: u32, mrv: u32) -> Self {
    Self { mv, mev, mav, mrv }
  }

  /// Literature defaults per muscle
  pub fn default_for(muscle: MuscleGroup) -> Self {
    match muscle {
      MuscleGroup::Chest => Self::new(4, 6, 16, 22),
      MuscleGroup::Back => Self::new(6, 10, 20, 25),
      MuscleGroup::Quads => Self::new(6, 10, 16, 20),
      MuscleGroup::Hamstrings => Self::new(4, 6, 16, 20),
      MuscleGroup::Shoulders => Self::new(4, 8, 16, 20),
      MuscleGroup::Biceps => Self::new(4, 6, 14, 20),
      MuscleGroup::Triceps => Self::new(4, 6, 14, 18),
      MuscleGroup::Calves => Self::new(6, 8, 16, 22),
      MuscleGroup::Abs => Self::new(0, 6, 16, 25),
      MuscleGroup::Forearms => Self::new(2, 4, 10, 16),
      MuscleGroup::Neck => Self::new(0, 2, 8, 12),
      MuscleGroup::Traps => Self::new(2, 4, 12, 16),
    }
  }

  pub fn is_ordered(&self) -> bool {
    self.mv <= self.mev && self.mev <= self.mav && self.mav <= self.mrv
  }

  /// Zone for a weekly set count, using half-open bands [MV, MEV, MAV, MRV)
  pub fn status(&self, sets: u32) -> VolumeStatus {
    if sets < self.mv {
      VolumeStatus::UnderMinimum
    } else if sets < self.mev {
      VolumeStatus::Maintenance
    } else if sets < self.mav {
      VolumeStatus::Optimal
    } else if sets < self.mrv {
      VolumeStatus::High
    } else {
      VolumeStatus::Maximum
    }
  }

  /// Overwrite only the landmarks present in `update`
  pub fn apply(&mut self, update: &LandmarkUpdate) {
    if let Some(mv) = update.mv {
      self.mv = mv;
    }
    if let Some(mev) = update.mev {
      self.mev = mev;
    }
    if let Some(mav) = update.mav {
      self.mav = mav;
    }
    if let Some(mrv) = update.mrv {
      self.mrv = mrv;
    }
  }
}

/// Partial landmark write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct LandmarkUpdate {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mv: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mev: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mav: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mrv: Option<u32>,
}

impl From<VolumeLandmarks> for LandmarkUpdate {
  fn from(l: VolumeLandmarks) -> Self {
    Self {
      mv: Some(l.mv),
      mev: Some(l.mev),
      mav: Some(l.mav),
      mrv: Some(l.mrv),
    }
  }
}

/// Volume zone relative to the landmarks, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeStatus {
  UnderMinimum,
  Maintenance,
  Optimal,
  High,
  Maximum,
}

impl VolumeStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      VolumeStatus::UnderMinimum => "under-minimum",
      VolumeStatus::Maintenance => "maintenance",
      VolumeStatus::Optimal => "optimal",
      VolumeStatus::High => "high",
      VolumeStatus::Maximum => "maximum",
    }
  }
}

impl std::fmt::Display for VolumeStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Preset tiers used to scale landmarks before writing them back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceTier {
  Beginner,
  Intermediate,
  Advanced,
}

impl ExperienceTier {
  pub fn multiplier(&self) -> f64 {
    match self {
      ExperienceTier::Beginner => 0.8,
      ExperienceTier::Intermediate => 1.0,
      ExperienceTier::Advanced => 1.2,
    }
  }

  /// Scale all four landmarks, rounding to whole sets
  pub fn scale(&self, landmarks: &VolumeLandmarks) -> VolumeLandmarks {
    let m = self.multiplier();
    let scale = |v: u32| (v as f64 * m).round() as u32;
    VolumeLandmarks::new(
      scale(landmarks.mv),
      scale(landmarks.mev),
      scale(landmarks.mav),
      scale(landmarks.mrv),
    )
  }
}

impl std::fmt::Display for ExperienceTier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ExperienceTier::Beginner => write!(f, "beginner"),
      ExperienceTier::Intermediate => write!(f, "intermediate"),
      ExperienceTier::Advanced => write!(f, "advanced"),
    }
  }
}
