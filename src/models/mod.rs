pub mod landmarks;
pub mod muscle;
pub mod report;

pub use landmarks::{ExperienceTier, LandmarkUpdate, VolumeLandmarks, VolumeStatus};
pub use muscle::{MuscleGroup, MAJOR_MUSCLES};
pub use report::{clamp_score, parse_reports, LoadReport, StimulusFeedback, WeeklyReport};
