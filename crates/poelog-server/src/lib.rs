//! HTTP/WebSocket delivery surface for the poelog companion service.

pub mod config;
pub mod logging;
pub mod routes;
pub mod state;
pub mod ws;

use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Handler for message-stream WebSocket upgrade.
async fn messages_ws(State(state): State<Arc<AppState>>, upgrade: WebSocketUpgrade) -> Response {
    upgrade.on_upgrade(move |socket| handle_messages_ws(socket, state))
}

async fn handle_messages_ws(socket: WebSocket, state: Arc<AppState>) {
    if let Err(e) = ws::handle_websocket(socket, state).await {
        tracing::error!(target: "poelog::ws", "WebSocket error: {}", e);
    }
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/messages", get(routes::messages::list))
        .route("/chat", post(routes::chat::send_chat))
        .route("/action", post(routes::chat::send_action))
        .route("/channels", get(routes::vocab::channels))
        .route("/commands", get(routes::vocab::commands))
        .route("/health", get(routes::health));

    let ws_routes = Router::new().route("/messages", get(messages_ws));

    Router::new()
        .nest("/api", api_routes)
        .nest("/ws", ws_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
