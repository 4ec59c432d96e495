use axum::extract::State;
use axum::Json;
use rover_core::command::Command;
use rover_core::pins;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct AimBody {
    /// Nozzle angle in degrees, 0-180.
    pub angle: f64,
}

/// POST /turn_spray — rotate the spray nozzle to an absolute angle.
pub async fn aim(
    State(app): State<AppState>,
    Json(body): Json<AimBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    super::submit(
        app,
        Command::AimNozzle {
            angle_deg: body.angle,
        },
    )
    .await
}

#[derive(serde::Deserialize)]
pub struct FireBody {
    /// Spray duration in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
}

fn default_duration() -> f64 {
    pins::DEFAULT_SPRAY_SECS
}

/// POST /activate_spray — energize the spray relay for a fixed duration.
pub async fn fire(
    State(app): State<AppState>,
    Json(body): Json<FireBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cmd = Command::fire_spray(body.duration)?;
    super::submit(app, cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_defaults_to_five_seconds() {
        let body: FireBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.duration, 5.0);
    }
}
