use rover_core::bank::LinesProbe;
use rover_core::worker::ActuatorClient;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Submission handle onto the single actuation worker.
    pub actuator: ActuatorClient,
    /// Live snapshot of the output lines, for the diagnostics endpoint.
    pub lines: LinesProbe,
}

impl AppState {
    pub fn new(actuator: ActuatorClient, lines: LinesProbe) -> Self {
        Self { actuator, lines }
    }
}
