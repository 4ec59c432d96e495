//! Actuation sequencer: translates one [`Command`] into a sequence of
//! output-line writes and a timed wait, then restores the touched lines to
//! their quiescent level.
//!
//! Waits are monotonic-deadline loops that poll a [`CancelToken`], so a
//! shutdown can interrupt a long move or spray. Teardown writes run whether
//! the wait completed or was interrupted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::bank::ActuatorBank;
use crate::command::{CameraDirection, Command, Heading, Outcome};
use crate::error::{Result, RoverError};
use crate::kinematics;
use crate::pins;

/// How often an in-flight wait checks for cancellation.
const CANCEL_POLL: Duration = Duration::from_millis(20);

/// Shared flag that interrupts in-flight waits. Set once, never cleared.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Executes one command at a time against the owned actuator bank.
pub struct Sequencer<B: ActuatorBank> {
    bank: B,
    cancel: CancelToken,
}

impl<B: ActuatorBank> Sequencer<B> {
    pub fn new(bank: B, cancel: CancelToken) -> Self {
        Self { bank, cancel }
    }

    pub fn execute(&mut self, cmd: &Command) -> Result<Outcome> {
        tracing::debug!(?cmd, "executing actuation command");
        match *cmd {
            Command::Move {
                heading,
                distance_m,
                speed_pct,
            } => self.drive(heading, distance_m, speed_pct),
            Command::Stop => self.stop(),
            Command::AimCamera { direction } => self.aim_camera(direction),
            Command::AimNozzle { angle_deg } => self.aim_nozzle(angle_deg),
            Command::FireSpray { duration } => self.fire_spray(duration),
        }
    }

    fn drive(&mut self, heading: Heading, distance_m: f64, speed_pct: u8) -> Result<Outcome> {
        let speed_pct = if heading.is_turn() {
            kinematics::turn_speed(speed_pct)
        } else {
            speed_pct
        };

        let (left_reverse, right_reverse) = match heading {
            Heading::Forward => (false, false),
            Heading::Backward => (true, true),
            Heading::Left => (true, false),
            Heading::Right => (false, true),
        };

        self.bank.set_drive(left_reverse, right_reverse)?;
        let duty = f64::from(speed_pct);
        self.bank.set_motor_duty(duty, duty)?;

        // Time estimate uses the duty actually applied, halved for turns.
        let waited = self.wait(kinematics::travel_time(distance_m, speed_pct));
        self.bank.set_motor_duty(0.0, 0.0)?;
        waited?;

        Ok(Outcome::Moved {
            heading,
            distance_m,
            speed_pct,
        })
    }

    fn stop(&mut self) -> Result<Outcome> {
        self.bank.set_motor_duty(0.0, 0.0)?;
        Ok(Outcome::Stopped)
    }

    fn aim_camera(&mut self, direction: CameraDirection) -> Result<Outcome> {
        let angle_deg = direction.angle_deg();
        self.hold_servo(angle_deg, true)?;
        Ok(Outcome::CameraAimed {
            direction,
            angle_deg,
        })
    }

    fn aim_nozzle(&mut self, angle_deg: f64) -> Result<Outcome> {
        self.hold_servo(angle_deg, false)?;
        Ok(Outcome::NozzleAimed { angle_deg })
    }

    /// Apply the duty for the commanded angle, hold through the settle time,
    /// then release to zero so the idle servo does not buzz.
    fn hold_servo(&mut self, angle_deg: f64, camera: bool) -> Result<()> {
        let duty = kinematics::servo_duty_pct(angle_deg);
        if camera {
            self.bank.set_camera_duty(duty)?;
        } else {
            self.bank.set_nozzle_duty(duty)?;
        }
        let waited = self.wait(pins::SERVO_SETTLE);
        if camera {
            self.bank.set_camera_duty(0.0)?;
        } else {
            self.bank.set_nozzle_duty(0.0)?;
        }
        waited
    }

    fn fire_spray(&mut self, duration: Duration) -> Result<Outcome> {
        self.bank.set_spray_relay(true)?;
        let waited = self.wait(duration);
        self.bank.set_spray_relay(false)?;
        waited?;

        Ok(Outcome::Sprayed {
            duration_secs: duration.as_secs_f64(),
        })
    }

    /// Block until `duration` has elapsed on the monotonic clock, polling
    /// the cancel token. Callers run their teardown writes before
    /// propagating the `Interrupted` error.
    fn wait(&self, duration: Duration) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            if self.cancel.is_cancelled() {
                return Err(RoverError::Interrupted);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            thread::sleep((deadline - now).min(CANCEL_POLL));
        }
    }

    /// Force every line back to the safe state: relay open, duties zero,
    /// direction bits low. Runs unconditionally at worker exit.
    pub fn quiesce(&mut self) -> Result<()> {
        self.bank.set_spray_relay(false)?;
        self.bank.set_motor_duty(0.0, 0.0)?;
        self.bank.set_camera_duty(0.0)?;
        self.bank.set_nozzle_duty(0.0)?;
        self.bank.set_drive(false, false)?;
        tracing::debug!("actuator lines quiesced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::SimulatedBank;

    fn sequencer() -> (Sequencer<SimulatedBank>, crate::bank::WriteJournal) {
        let bank = SimulatedBank::new();
        let journal = bank.journal();
        (Sequencer::new(bank, CancelToken::new()), journal)
    }

    #[test]
    fn forward_drive_applies_full_speed_then_restores_zero() {
        let (mut seq, journal) = sequencer();
        let outcome = seq
            .execute(&Command::Move {
                heading: Heading::Forward,
                distance_m: 0.001,
                speed_pct: 100,
            })
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Moved {
                heading: Heading::Forward,
                distance_m: 0.001,
                speed_pct: 100,
            }
        );

        let snaps = journal.snapshots();
        // dir write, duty-on write, duty-off write
        assert_eq!(snaps.len(), 3);
        assert!(!snaps[0].left_reverse && !snaps[0].right_reverse);
        assert_eq!(snaps[1].left_duty_pct, 100.0);
        assert_eq!(snaps[1].right_duty_pct, 100.0);
        assert_eq!(snaps[2].left_duty_pct, 0.0);
        assert_eq!(snaps[2].right_duty_pct, 0.0);
    }

    #[test]
    fn turns_apply_half_speed_to_both_motors() {
        let (mut seq, journal) = sequencer();
        let outcome = seq
            .execute(&Command::Move {
                heading: Heading::Left,
                distance_m: 0.001,
                speed_pct: 50,
            })
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Moved {
                heading: Heading::Left,
                distance_m: 0.001,
                speed_pct: 25,
            }
        );

        let snaps = journal.snapshots();
        assert!(snaps[0].left_reverse && !snaps[0].right_reverse);
        assert_eq!(snaps[1].left_duty_pct, 25.0);
        assert_eq!(snaps[1].right_duty_pct, 25.0);
    }

    #[test]
    fn zero_speed_drive_returns_immediately() {
        let (mut seq, _journal) = sequencer();
        let started = Instant::now();
        seq.execute(&Command::Move {
            heading: Heading::Forward,
            distance_m: 1000.0,
            speed_pct: 0,
        })
        .unwrap();
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn stop_zeroes_both_duties_without_touching_direction() {
        let (mut seq, journal) = sequencer();
        seq.execute(&Command::Move {
            heading: Heading::Backward,
            distance_m: 0.001,
            speed_pct: 80,
        })
        .unwrap();
        seq.execute(&Command::Stop).unwrap();

        let last = *journal.snapshots().last().unwrap();
        assert_eq!(last.left_duty_pct, 0.0);
        assert_eq!(last.right_duty_pct, 0.0);
        // Direction bits keep their prior backward state.
        assert!(last.left_reverse && last.right_reverse);
    }

    #[test]
    fn camera_aim_holds_then_releases_the_servo() {
        let (mut seq, journal) = sequencer();
        seq.execute(&Command::AimCamera {
            direction: CameraDirection::Left,
        })
        .unwrap();

        let snaps = journal.snapshots();
        assert_eq!(snaps.len(), 2);
        let expected = kinematics::servo_duty_pct(60.0);
        assert!((snaps[0].camera_duty_pct - expected).abs() < 1e-9);
        assert_eq!(snaps[1].camera_duty_pct, 0.0);
    }

    #[test]
    fn spray_fire_energizes_for_at_least_the_requested_duration() {
        let (mut seq, journal) = sequencer();
        let started = Instant::now();
        seq.execute(&Command::fire_spray(0.05).unwrap()).unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(500), "got {elapsed:?}");

        let snaps = journal.snapshots();
        assert!(snaps[0].spray_energized);
        assert!(!snaps[1].spray_energized);
    }

    #[test]
    fn cancelled_spray_still_releases_the_relay() {
        let bank = SimulatedBank::new();
        let probe = bank.probe();
        let cancel = CancelToken::new();
        let mut seq = Sequencer::new(bank, cancel.clone());

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            cancel.cancel();
        });

        let started = Instant::now();
        let result = seq.execute(&Command::fire_spray(30.0).unwrap());
        canceller.join().unwrap();

        assert!(matches!(result, Err(RoverError::Interrupted)));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(!probe.read().spray_energized);
    }

    #[test]
    fn quiesce_restores_the_safe_state_from_anything() {
        let (mut seq, journal) = sequencer();
        seq.execute(&Command::Move {
            heading: Heading::Backward,
            distance_m: 0.001,
            speed_pct: 60,
        })
        .unwrap();
        seq.quiesce().unwrap();

        let last = *journal.snapshots().last().unwrap();
        assert_eq!(last, crate::bank::LineLevels::default());
    }
}
