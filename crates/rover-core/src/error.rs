use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoverError {
    #[error("invalid heading '{0}': use 'forward', 'backward', 'left', or 'right'")]
    InvalidHeading(String),

    #[error("invalid camera direction '{0}': use 'left', 'right', or 'straight'")]
    InvalidDirection(String),

    #[error("speed {0}% out of range: must be 0-100")]
    SpeedOutOfRange(u8),

    #[error("distance {0} m out of range: must be finite and non-negative")]
    DistanceOutOfRange(f64),

    #[error("angle {0} deg out of range: must be within 0-180")]
    AngleOutOfRange(f64),

    #[error("spray duration {0} s out of range: must be finite and non-negative")]
    DurationOutOfRange(f64),

    #[error("hardware fault on {line}: {message}")]
    Hardware { line: &'static str, message: String },

    #[error("actuation interrupted by shutdown")]
    Interrupted,

    #[error("actuation worker is not running")]
    WorkerGone,
}

pub type Result<T> = std::result::Result<T, RoverError>;
