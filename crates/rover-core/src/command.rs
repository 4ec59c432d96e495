//! Logical actuation commands and their typed outcomes.
//!
//! A `Command` is constructed per request, validated, executed once by the
//! sequencer, and discarded. Nothing here touches hardware.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, RoverError};
use crate::pins;

/// Drive heading. Turns run the tracks against each other in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    Forward,
    Backward,
    Left,
    Right,
}

impl Heading {
    pub fn as_str(&self) -> &'static str {
        match self {
            Heading::Forward => "forward",
            Heading::Backward => "backward",
            Heading::Left => "left",
            Heading::Right => "right",
        }
    }

    pub fn is_turn(&self) -> bool {
        matches!(self, Heading::Left | Heading::Right)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Heading {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Heading::Forward),
            "backward" => Ok(Heading::Backward),
            "left" => Ok(Heading::Left),
            "right" => Ok(Heading::Right),
            _ => Err(RoverError::InvalidHeading(s.to_string())),
        }
    }
}

/// Camera pan preset. Each maps to a fixed angle from the calibration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraDirection {
    Left,
    Right,
    Straight,
}

impl CameraDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraDirection::Left => "left",
            CameraDirection::Right => "right",
            CameraDirection::Straight => "straight",
        }
    }

    pub fn angle_deg(&self) -> f64 {
        match self {
            CameraDirection::Left => pins::CAMERA_LEFT_DEG,
            CameraDirection::Right => pins::CAMERA_RIGHT_DEG,
            CameraDirection::Straight => pins::CAMERA_STRAIGHT_DEG,
        }
    }
}

impl fmt::Display for CameraDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CameraDirection {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(CameraDirection::Left),
            "right" => Ok(CameraDirection::Right),
            "straight" => Ok(CameraDirection::Straight),
            _ => Err(RoverError::InvalidDirection(s.to_string())),
        }
    }
}

/// One logical actuation command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Move {
        heading: Heading,
        distance_m: f64,
        speed_pct: u8,
    },
    Stop,
    AimCamera {
        direction: CameraDirection,
    },
    AimNozzle {
        angle_deg: f64,
    },
    FireSpray {
        duration: Duration,
    },
}

impl Command {
    /// Build a spray command from a caller-supplied duration in seconds.
    /// Rejects non-finite or negative values before a `Duration` exists.
    pub fn fire_spray(duration_secs: f64) -> Result<Self> {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(RoverError::DurationOutOfRange(duration_secs));
        }
        Ok(Command::FireSpray {
            duration: Duration::from_secs_f64(duration_secs),
        })
    }

    /// Range checks, run before a command is enqueued. A command that fails
    /// validation performs zero hardware writes.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Command::Move {
                distance_m,
                speed_pct,
                ..
            } => {
                if speed_pct > 100 {
                    return Err(RoverError::SpeedOutOfRange(speed_pct));
                }
                if !distance_m.is_finite() || distance_m < 0.0 {
                    return Err(RoverError::DistanceOutOfRange(distance_m));
                }
                Ok(())
            }
            Command::AimNozzle { angle_deg } => {
                if !angle_deg.is_finite() || !(0.0..=180.0).contains(&angle_deg) {
                    return Err(RoverError::AngleOutOfRange(angle_deg));
                }
                Ok(())
            }
            Command::Stop | Command::AimCamera { .. } | Command::FireSpray { .. } => Ok(()),
        }
    }
}

/// What a successfully executed command did, with enough detail to render
/// the human-readable status string returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Moved {
        heading: Heading,
        distance_m: f64,
        /// Duty actually applied — half the requested speed for turns.
        speed_pct: u8,
    },
    Stopped,
    CameraAimed {
        direction: CameraDirection,
        angle_deg: f64,
    },
    NozzleAimed {
        angle_deg: f64,
    },
    Sprayed {
        duration_secs: f64,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Moved {
                heading,
                distance_m,
                speed_pct,
            } => write!(f, "Moved {heading} for {distance_m} meters at {speed_pct}% speed"),
            Outcome::Stopped => f.write_str("Motor stopped"),
            Outcome::CameraAimed {
                direction,
                angle_deg,
            } => write!(f, "Camera rotated {direction} ({angle_deg}\u{b0})"),
            Outcome::NozzleAimed { angle_deg } => {
                write!(f, "Spray nozzle rotated to {angle_deg}\u{b0}")
            }
            Outcome::Sprayed { duration_secs } => {
                write!(f, "Spray activated for {duration_secs} seconds")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_parses_case_insensitively() {
        assert_eq!("FORWARD".parse::<Heading>().unwrap(), Heading::Forward);
        assert_eq!("Left".parse::<Heading>().unwrap(), Heading::Left);
        assert!("sideways".parse::<Heading>().is_err());
    }

    #[test]
    fn camera_direction_parses_case_insensitively() {
        let upper = "LEFT".parse::<CameraDirection>().unwrap();
        let lower = "left".parse::<CameraDirection>().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.angle_deg(), 60.0);
    }

    #[test]
    fn unknown_camera_direction_is_rejected() {
        let err = "up".parse::<CameraDirection>().unwrap_err();
        assert!(matches!(err, RoverError::InvalidDirection(ref s) if s == "up"));
    }

    #[test]
    fn validate_rejects_out_of_range_speed() {
        let cmd = Command::Move {
            heading: Heading::Forward,
            distance_m: 1.0,
            speed_pct: 101,
        };
        assert!(matches!(
            cmd.validate(),
            Err(RoverError::SpeedOutOfRange(101))
        ));
    }

    #[test]
    fn validate_rejects_negative_distance() {
        let cmd = Command::Move {
            heading: Heading::Backward,
            distance_m: -0.5,
            speed_pct: 10,
        };
        assert!(matches!(
            cmd.validate(),
            Err(RoverError::DistanceOutOfRange(_))
        ));
    }

    #[test]
    fn validate_rejects_nozzle_angle_outside_servo_range() {
        let cmd = Command::AimNozzle { angle_deg: 180.5 };
        assert!(matches!(cmd.validate(), Err(RoverError::AngleOutOfRange(_))));
        let cmd = Command::AimNozzle { angle_deg: -1.0 };
        assert!(matches!(cmd.validate(), Err(RoverError::AngleOutOfRange(_))));
    }

    #[test]
    fn fire_spray_rejects_negative_and_non_finite_durations() {
        assert!(matches!(
            Command::fire_spray(-1.0),
            Err(RoverError::DurationOutOfRange(_))
        ));
        assert!(matches!(
            Command::fire_spray(f64::NAN),
            Err(RoverError::DurationOutOfRange(_))
        ));
        assert!(Command::fire_spray(2.0).is_ok());
    }

    #[test]
    fn outcome_status_strings_match_device_api() {
        let moved = Outcome::Moved {
            heading: Heading::Forward,
            distance_m: 0.5,
            speed_pct: 50,
        };
        assert_eq!(moved.to_string(), "Moved forward for 0.5 meters at 50% speed");
        assert_eq!(Outcome::Stopped.to_string(), "Motor stopped");
        let aimed = Outcome::CameraAimed {
            direction: CameraDirection::Left,
            angle_deg: 60.0,
        };
        assert_eq!(aimed.to_string(), "Camera rotated left (60\u{b0})");
        let sprayed = Outcome::Sprayed { duration_secs: 5.0 };
        assert_eq!(sprayed.to_string(), "Spray activated for 5 seconds");
    }
}
