use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("unknown sensor {0:?}")]
    UnknownSensor(String),

    #[error("sensor {sensor} expects {expected} MDL values, got {got}")]
    MdlCount {
        sensor:   String,
        expected: &'static str,
        got:      usize,
    },

    #[error("sensor {sensor}: {reason}")]
    InvalidParameter { sensor: String, reason: String },
}

pub type DetectResult<T> = Result<T, DetectError>;
