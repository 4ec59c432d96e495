//! GPIO pin assignments (BCM numbering) and fixed robot parameters.
//!
//! Single source of truth — every module references these constants rather
//! than hard-coding pin numbers or calibration values.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Drive motors (dual H-bridge)
// ---------------------------------------------------------------------------

pub const LEFT_MOTOR_PWM_GPIO: u8 = 18;
/// Digital output: LOW = forward, HIGH = reverse.
pub const LEFT_MOTOR_DIR_GPIO: u8 = 23;
pub const RIGHT_MOTOR_PWM_GPIO: u8 = 19;
pub const RIGHT_MOTOR_DIR_GPIO: u8 = 24;

// ---------------------------------------------------------------------------
// Camera pan servo
// ---------------------------------------------------------------------------

pub const CAMERA_SERVO_GPIO: u8 = 17;

// ---------------------------------------------------------------------------
// Sprayer
// ---------------------------------------------------------------------------

/// Relay gating power to the spray pump. Active-low: driving the line LOW
/// energizes the relay.
pub const SPRAY_RELAY_GPIO: u8 = 26;
pub const SPRAY_SERVO_GPIO: u8 = 27;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

pub const MOTOR_PWM_FREQ_HZ: f64 = 1_000.0;
/// Hobby servos expect a 50 Hz frame.
pub const SERVO_PWM_FREQ_HZ: f64 = 50.0;

// ---------------------------------------------------------------------------
// Drivetrain parameters
// ---------------------------------------------------------------------------

pub const WHEEL_DIAMETER_M: f64 = 0.15;
/// Motor shaft speed at 100% duty.
pub const MAX_RPM: f64 = 50.0;

// ---------------------------------------------------------------------------
// Servo presets and timing
// ---------------------------------------------------------------------------

/// Time for a servo to physically reach a commanded angle before the control
/// signal is released.
pub const SERVO_SETTLE: Duration = Duration::from_millis(500);

/// Fixed camera pan angles.
pub const CAMERA_LEFT_DEG: f64 = 60.0;
pub const CAMERA_RIGHT_DEG: f64 = 120.0;
pub const CAMERA_STRAIGHT_DEG: f64 = 90.0;

pub const DEFAULT_SPRAY_SECS: f64 = 5.0;
