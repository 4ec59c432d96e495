use anyhow::Result;
use clap::{Args, Subcommand};
use rover_core::command::{CameraDirection, Command, Heading};
use rover_core::sequencer::{CancelToken, Sequencer};

// ---------------------------------------------------------------------------
// Argument definitions
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct DriveArgs {
    /// Heading: forward, backward, left, or right
    pub heading: String,

    /// Distance to travel in meters
    #[arg(long)]
    pub distance: f64,

    /// Duty-cycle speed, 0-100
    #[arg(long, default_value = "10")]
    pub speed: u8,
}

#[derive(Args, Debug)]
pub struct CameraArgs {
    /// Direction: left, right, or straight (any case)
    pub direction: String,
}

#[derive(Subcommand, Debug)]
pub enum SpraySubcommand {
    /// Rotate the spray nozzle to an absolute angle
    Aim {
        /// Nozzle angle in degrees, 0-180
        #[arg(long)]
        angle: f64,
    },
    /// Energize the spray relay for a fixed duration
    Fire {
        /// Spray duration in seconds
        #[arg(long, default_value = "5.0")]
        duration: f64,
    },
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn drive(args: DriveArgs, simulate: bool, json: bool) -> Result<()> {
    let heading: Heading = args.heading.parse()?;
    execute(
        Command::Move {
            heading,
            distance_m: args.distance,
            speed_pct: args.speed,
        },
        simulate,
        json,
    )
}

pub fn stop(simulate: bool, json: bool) -> Result<()> {
    execute(Command::Stop, simulate, json)
}

pub fn camera(args: CameraArgs, simulate: bool, json: bool) -> Result<()> {
    let direction: CameraDirection = args.direction.parse()?;
    execute(Command::AimCamera { direction }, simulate, json)
}

pub fn spray(subcommand: SpraySubcommand, simulate: bool, json: bool) -> Result<()> {
    let cmd = match subcommand {
        SpraySubcommand::Aim { angle } => Command::AimNozzle { angle_deg: angle },
        SpraySubcommand::Fire { duration } => Command::fire_spray(duration)?,
    };
    execute(cmd, simulate, json)
}

/// Run one command to completion against a locally owned bank, then leave
/// the lines quiescent. No queue is needed for a one-shot process.
fn execute(cmd: Command, simulate: bool, json: bool) -> Result<()> {
    cmd.validate()?;

    let bank = super::open_bank(simulate)?;
    let mut sequencer = Sequencer::new(bank, CancelToken::new());
    let outcome = sequencer.execute(&cmd)?;
    sequencer.quiesce()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{outcome}");
    }
    Ok(())
}
