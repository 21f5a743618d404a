//! WebSocket message protocol between the server and UI clients.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsClientMessage {
    /// Ping for keepalive.
    Ping { timestamp: u64 },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsServerMessage {
    /// The tailer has opened the log file and live tailing has begun.
    Initialized,
    /// A new message was appended to the history.
    NewMessage { message: Message },
    /// Server-side error.
    Error { code: String, message: String },
}
