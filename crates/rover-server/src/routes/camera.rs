use axum::extract::{Path, State};
use axum::Json;
use rover_core::command::{CameraDirection, Command};

use crate::error::AppError;
use crate::state::AppState;

/// POST /camera/{direction} — pan the camera to a fixed preset.
/// The direction is matched case-insensitively; an unknown one is rejected
/// before any line is written.
pub async fn aim(
    State(app): State<AppState>,
    Path(direction): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let direction: CameraDirection = direction.parse()?;
    super::submit(app, Command::AimCamera { direction }).await
}
