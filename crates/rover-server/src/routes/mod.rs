pub mod camera;
pub mod motion;
pub mod spray;
pub mod status;

use axum::Json;
use rover_core::command::Command;

use crate::error::AppError;
use crate::state::AppState;

/// Run one command through the actuation worker off the async runtime and
/// render its outcome as the `{"status": ...}` payload.
pub(crate) async fn submit(
    app: AppState,
    cmd: Command,
) -> Result<Json<serde_json::Value>, AppError> {
    let outcome = tokio::task::spawn_blocking(move || app.actuator.submit(cmd))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "status": outcome.to_string() })))
}
