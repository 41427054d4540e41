use axum::Json;
use axum::Router;
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::transport::AppState;
use crate::transport::websocket::ws_handler;

pub const STATUS_MESSAGE: &str = "WebSocket server is running!";

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

/// Builds the router: `GET /` for liveness and `GET /ws` for the relay.
///
/// CORS is wide open (any origin, with credentials, any method and header)
/// and is left for the deployer to tighten.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/ws", get(ws_handler))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
}

async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: STATUS_MESSAGE,
    })
}
