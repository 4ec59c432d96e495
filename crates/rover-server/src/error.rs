use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rover_core::RoverError;

/// Unified error type for HTTP responses.
///
/// Rejected commands (bad direction, out-of-range speed/distance/angle/
/// duration) map to 400; hardware write faults to 500; a missing or
/// shutting-down actuation worker to 503. The body is always
/// `{"error": "..."}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<RoverError>() {
            match e {
                RoverError::InvalidHeading(_)
                | RoverError::InvalidDirection(_)
                | RoverError::SpeedOutOfRange(_)
                | RoverError::DistanceOutOfRange(_)
                | RoverError::AngleOutOfRange(_)
                | RoverError::DurationOutOfRange(_) => StatusCode::BAD_REQUEST,
                RoverError::Hardware { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                RoverError::Interrupted | RoverError::WorkerGone => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
