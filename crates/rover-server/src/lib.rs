pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use rover_core::bank::LinesProbe;
use rover_core::worker::ActuatorClient;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all actuation routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(actuator: ActuatorClient, lines: LinesProbe) -> Router {
    let app_state = state::AppState::new(actuator, lines);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Drive motors
        .route("/forward", post(routes::motion::forward))
        .route("/backward", post(routes::motion::backward))
        .route("/left", post(routes::motion::left))
        .route("/right", post(routes::motion::right))
        .route("/stop", post(routes::motion::stop))
        // Camera pan servo
        .route("/camera/{direction}", post(routes::camera::aim))
        // Sprayer
        .route("/turn_spray", post(routes::spray::aim))
        .route("/activate_spray", post(routes::spray::fire))
        // Diagnostics
        .route("/status", get(routes::status::lines))
        .layer(cors)
        .with_state(app_state)
}

/// Start the rover control daemon on `0.0.0.0:{port}`. Pass port 0 to let
/// the OS pick a free one; the bound address is logged either way.
pub async fn serve(actuator: ActuatorClient, lines: LinesProbe, port: u16) -> anyhow::Result<()> {
    let app = build_router(actuator, lines);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    let actual_port = listener.local_addr()?.port();

    tracing::info!("rover control daemon listening on http://0.0.0.0:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
