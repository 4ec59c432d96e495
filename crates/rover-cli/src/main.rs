mod cmd;

use clap::{Parser, Subcommand};
use cmd::actuate::{CameraArgs, DriveArgs, SpraySubcommand};

#[derive(Parser)]
#[command(
    name = "rover",
    about = "Open-loop actuation daemon for a small spraying rover",
    version,
    propagate_version = true
)]
struct Cli {
    /// Use the in-memory simulated bank even when GPIO support is compiled in
    #[arg(long, global = true, env = "ROVER_SIMULATE")]
    simulate: bool,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP control daemon
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "8000", env = "ROVER_PORT")]
        port: u16,
    },

    /// Drive the rover a fixed distance
    Drive(DriveArgs),

    /// Immediately zero both motor duty cycles
    Stop,

    /// Pan the camera to a preset direction
    Camera(CameraArgs),

    /// Aim or fire the sprayer
    Spray {
        #[command(subcommand)]
        subcommand: SpraySubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve { port } => cmd::serve::run(port, cli.simulate),
        Commands::Drive(args) => cmd::actuate::drive(args, cli.simulate, cli.json),
        Commands::Stop => cmd::actuate::stop(cli.simulate, cli.json),
        Commands::Camera(args) => cmd::actuate::camera(args, cli.simulate, cli.json),
        Commands::Spray { subcommand } => cmd::actuate::spray(subcommand, cli.simulate, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
