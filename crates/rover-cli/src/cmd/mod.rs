pub mod actuate;
pub mod serve;

use rover_core::bank::{ActuatorBank, SimulatedBank};

/// Pick the actuator backend. With the `raspi` feature the real GPIO bank is
/// the default and `--simulate` opts out; without it the simulated bank is
/// the only option.
#[cfg(feature = "raspi")]
pub(crate) fn open_bank(simulate: bool) -> anyhow::Result<Box<dyn ActuatorBank>> {
    if simulate {
        Ok(Box::new(SimulatedBank::new()))
    } else {
        Ok(Box::new(rover_core::hardware::GpioBank::open()?))
    }
}

#[cfg(not(feature = "raspi"))]
pub(crate) fn open_bank(simulate: bool) -> anyhow::Result<Box<dyn ActuatorBank>> {
    if !simulate {
        tracing::warn!("built without the 'raspi' feature; using the simulated actuator bank");
    }
    Ok(Box::new(SimulatedBank::new()))
}
