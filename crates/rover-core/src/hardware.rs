//! Raspberry Pi GPIO backend, available behind the `raspi` feature.
//!
//! Motors and servos are driven with software PWM at the frequencies from
//! [`pins`] (1 kHz motors, 50 Hz servos). The spray relay is active-low;
//! that inversion is confined to this module — everything above it speaks
//! in terms of a logical `energized` flag.

use std::sync::{Arc, Mutex};

use rppal::gpio::{Gpio, OutputPin};

use crate::bank::{lock_or_recover, ActuatorBank, LineLevels, LinesProbe, SharedLines};
use crate::error::{Result, RoverError};
use crate::pins;

fn fault(line: &'static str) -> impl FnOnce(rppal::gpio::Error) -> RoverError {
    move |e| RoverError::Hardware {
        line,
        message: e.to_string(),
    }
}

/// Owns every output line of the rover. Constructed once at process start;
/// exclusive ownership of the pins guarantees no other code can write them.
pub struct GpioBank {
    left_pwm: OutputPin,
    right_pwm: OutputPin,
    left_dir: OutputPin,
    right_dir: OutputPin,
    camera_servo: OutputPin,
    nozzle_servo: OutputPin,
    relay: OutputPin,
    lines: SharedLines,
}

impl GpioBank {
    /// Claim every output line and force the quiescent state: relay
    /// de-energized, all duties zero, direction bits low. A failure here
    /// aborts process launch — it is the only fatal hardware fault.
    pub fn open() -> Result<Self> {
        let gpio = Gpio::new().map_err(fault("gpio controller"))?;

        let left_pwm = gpio
            .get(pins::LEFT_MOTOR_PWM_GPIO)
            .map_err(fault("left motor pwm"))?
            .into_output_low();
        let right_pwm = gpio
            .get(pins::RIGHT_MOTOR_PWM_GPIO)
            .map_err(fault("right motor pwm"))?
            .into_output_low();
        let left_dir = gpio
            .get(pins::LEFT_MOTOR_DIR_GPIO)
            .map_err(fault("left motor dir"))?
            .into_output_low();
        let right_dir = gpio
            .get(pins::RIGHT_MOTOR_DIR_GPIO)
            .map_err(fault("right motor dir"))?
            .into_output_low();
        let camera_servo = gpio
            .get(pins::CAMERA_SERVO_GPIO)
            .map_err(fault("camera servo"))?
            .into_output_low();
        let nozzle_servo = gpio
            .get(pins::SPRAY_SERVO_GPIO)
            .map_err(fault("spray nozzle servo"))?
            .into_output_low();
        // Active-low relay: HIGH keeps the spray pump unpowered.
        let relay = gpio
            .get(pins::SPRAY_RELAY_GPIO)
            .map_err(fault("spray relay"))?
            .into_output_high();

        tracing::info!("gpio bank initialized, all lines quiescent");

        Ok(Self {
            left_pwm,
            right_pwm,
            left_dir,
            right_dir,
            camera_servo,
            nozzle_servo,
            relay,
            lines: Arc::new(Mutex::new(LineLevels::default())),
        })
    }

    fn apply_duty(
        pin: &mut OutputPin,
        freq_hz: f64,
        duty_pct: f64,
        line: &'static str,
    ) -> Result<()> {
        if duty_pct <= 0.0 {
            pin.clear_pwm().map_err(fault(line))?;
            pin.set_low();
        } else {
            pin.set_pwm_frequency(freq_hz, (duty_pct / 100.0).clamp(0.0, 1.0))
                .map_err(fault(line))?;
        }
        Ok(())
    }

    fn mirror(&self, apply: impl FnOnce(&mut LineLevels)) {
        apply(&mut lock_or_recover(&self.lines));
    }
}

impl ActuatorBank for GpioBank {
    fn set_drive(&mut self, left_reverse: bool, right_reverse: bool) -> Result<()> {
        if left_reverse {
            self.left_dir.set_high();
        } else {
            self.left_dir.set_low();
        }
        if right_reverse {
            self.right_dir.set_high();
        } else {
            self.right_dir.set_low();
        }
        self.mirror(|l| {
            l.left_reverse = left_reverse;
            l.right_reverse = right_reverse;
        });
        Ok(())
    }

    fn set_motor_duty(&mut self, left_pct: f64, right_pct: f64) -> Result<()> {
        Self::apply_duty(
            &mut self.left_pwm,
            pins::MOTOR_PWM_FREQ_HZ,
            left_pct,
            "left motor pwm",
        )?;
        Self::apply_duty(
            &mut self.right_pwm,
            pins::MOTOR_PWM_FREQ_HZ,
            right_pct,
            "right motor pwm",
        )?;
        self.mirror(|l| {
            l.left_duty_pct = left_pct;
            l.right_duty_pct = right_pct;
        });
        Ok(())
    }

    fn set_camera_duty(&mut self, duty_pct: f64) -> Result<()> {
        Self::apply_duty(
            &mut self.camera_servo,
            pins::SERVO_PWM_FREQ_HZ,
            duty_pct,
            "camera servo",
        )?;
        self.mirror(|l| l.camera_duty_pct = duty_pct);
        Ok(())
    }

    fn set_nozzle_duty(&mut self, duty_pct: f64) -> Result<()> {
        Self::apply_duty(
            &mut self.nozzle_servo,
            pins::SERVO_PWM_FREQ_HZ,
            duty_pct,
            "spray nozzle servo",
        )?;
        self.mirror(|l| l.nozzle_duty_pct = duty_pct);
        Ok(())
    }

    fn set_spray_relay(&mut self, energized: bool) -> Result<()> {
        if energized {
            self.relay.set_low();
        } else {
            self.relay.set_high();
        }
        self.mirror(|l| l.spray_energized = energized);
        Ok(())
    }

    fn probe(&self) -> LinesProbe {
        LinesProbe::new(self.lines.clone())
    }
}
