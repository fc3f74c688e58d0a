use ldar_detect::DetectError;
use ldar_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("company configuration error: {0}")]
    Config(String),

    #[error("company configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sensor error: {0}")]
    Detect(#[from] DetectError),

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type CrewResult<T> = Result<T, CrewError>;
