use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("sensor timeout")]
    Timeout,
    #[error("sensor fault: {0}")]
    Sensor(String),
    #[error("servo fault: {0}")]
    Servo(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
