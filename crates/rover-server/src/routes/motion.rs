use axum::extract::State;
use axum::Json;
use rover_core::command::{Command, Heading};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct MoveBody {
    /// Distance to travel in meters.
    pub distance: f64,
    /// Duty-cycle speed, 0-100.
    #[serde(default = "default_speed")]
    pub speed: u8,
}

fn default_speed() -> u8 {
    10
}

async fn drive(
    app: AppState,
    heading: Heading,
    body: MoveBody,
) -> Result<Json<serde_json::Value>, AppError> {
    super::submit(
        app,
        Command::Move {
            heading,
            distance_m: body.distance,
            speed_pct: body.speed,
        },
    )
    .await
}

/// POST /forward — drive forward for a distance at a duty-cycle speed.
pub async fn forward(
    State(app): State<AppState>,
    Json(body): Json<MoveBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    drive(app, Heading::Forward, body).await
}

/// POST /backward — drive backward.
pub async fn backward(
    State(app): State<AppState>,
    Json(body): Json<MoveBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    drive(app, Heading::Backward, body).await
}

/// POST /left — turn left in place at half the commanded speed.
pub async fn left(
    State(app): State<AppState>,
    Json(body): Json<MoveBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    drive(app, Heading::Left, body).await
}

/// POST /right — turn right in place at half the commanded speed.
pub async fn right(
    State(app): State<AppState>,
    Json(body): Json<MoveBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    drive(app, Heading::Right, body).await
}

/// POST /stop — immediately zero both motor duty cycles.
pub async fn stop(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    super::submit(app, Command::Stop).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_defaults_to_ten_percent() {
        let body: MoveBody = serde_json::from_str(r#"{"distance": 0.5}"#).unwrap();
        assert_eq!(body.speed, 10);
        assert_eq!(body.distance, 0.5);
    }
}
