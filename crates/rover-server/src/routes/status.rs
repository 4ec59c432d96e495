use axum::extract::State;
use axum::Json;
use rover_core::bank::LineLevels;

use crate::state::AppState;

/// GET /status — live snapshot of every output line.
pub async fn lines(State(app): State<AppState>) -> Json<LineLevels> {
    Json(app.lines.read())
}
