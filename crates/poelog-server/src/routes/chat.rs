//! Outbound chat and slash-command routes.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use poelog_types::{Action, Channel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct SendChatRequest {
    /// Channel name ("Global", "Whisper", …).
    pub channel: String,
    pub text: String,
    /// Target player, required for whispers.
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Deserialize)]
pub struct SendActionRequest {
    /// Command keyword without the leading slash.
    pub command: String,
    #[serde(default)]
    pub args: Option<String>,
}

#[derive(Serialize)]
pub struct SendResponse {
    pub delivered: bool,
}

pub async fn send_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendChatRequest>,
) -> Result<Json<SendResponse>, (StatusCode, String)> {
    let channel = Channel::from_name(&req.channel);
    if channel == Channel::Invalid {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unknown channel: {}", req.channel),
        ));
    }
    if channel == Channel::Whisper && req.target.as_deref().unwrap_or("").is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Whispers need a target player".to_string(),
        ));
    }

    info!(target: "poelog::api", "Sending {} chat message", channel);
    state
        .dispatcher
        .send_chat(channel, &req.text, req.target.as_deref())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(SendResponse { delivered: true }))
}

pub async fn send_action(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendActionRequest>,
) -> Result<Json<SendResponse>, (StatusCode, String)> {
    let action = Action::from_command(&req.command).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("Unknown command: {}", req.command),
        )
    })?;

    info!(target: "poelog::api", "Sending /{} command", action.command());
    state
        .dispatcher
        .send_action(action, req.args.as_deref())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(SendResponse { delivered: true }))
}
