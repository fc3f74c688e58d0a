use thiserror::Error;

use ldar_core::CoreError;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule configuration error: {0}")]
    Config(String),

    #[error("home-base parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
