pub mod bank;
pub mod command;
pub mod error;
#[cfg(feature = "raspi")]
pub mod hardware;
pub mod kinematics;
pub mod pins;
pub mod sequencer;
pub mod worker;

pub use error::{Result, RoverError};
