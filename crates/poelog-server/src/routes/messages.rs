//! Message history routes.

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use poelog_types::Message;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ListQuery {
    /// Only return messages with a sequence id greater than this.
    #[serde(default)]
    pub since: Option<u64>,
    /// Cap on the number of messages returned, from the tail.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub messages: Vec<Message>,
    /// Total history length, independent of filtering.
    pub total: usize,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    let total = state.messages.len();
    let snapshot = match query.since {
        Some(seq) => state.messages.messages_since(seq),
        None => state.messages.messages(),
    };
    let skip = query
        .limit
        .map_or(0, |limit| snapshot.len().saturating_sub(limit));
    let messages = snapshot[skip..]
        .iter()
        .map(|m| (**m).clone())
        .collect();

    Json(ListResponse { messages, total })
}
