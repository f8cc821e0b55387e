use crate::{AppState, health, session, token, whoami, ws};

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws::handler))
        .route("/health", get(health::health))
        .route("/whoami", get(whoami))
        .route("/token", get(token))
        .route("/session", get(session))
        .with_state(state)
        // CORS middleware (allow all origins for WebSocket)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
