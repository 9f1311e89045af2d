use project_data::ProjectDataError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Duplicate activity: {0}")]
    DuplicateActivity(String),
    #[error("Activity {0} has no duration")]
    MissingDuration(String),
    #[error("Activity {activity} has invalid duration {duration}")]
    InvalidDuration { activity: String, duration: f64 },
    #[error("Activity {activity} references unknown activity {reference}")]
    UnknownActivity { activity: String, reference: String },
    #[error("Precedence cycle detected at activity {0}")]
    Cycle(String),
    #[error("Tolerance must be a finite, non-negative number, got {0}")]
    InvalidTolerance(f64),
    #[error("Infeasible schedule")]
    Infeasible,
    #[error(transparent)]
    ProjectData(#[from] ProjectDataError),
}
