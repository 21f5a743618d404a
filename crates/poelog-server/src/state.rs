//! Shared application state.

use crate::config::Config;
use poelog_core::{ChatDispatcher, ChatSink, LogEvent, LogTailer, LogTailerHandle, MessageParser};
use poelog_types::WsServerMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Shared application state.
pub struct AppState {
    /// History snapshots from the running tailer.
    pub messages: LogTailerHandle,
    /// Fan-out of tailer events to WebSocket clients.
    pub events: broadcast::Sender<WsServerMessage>,
    /// Outbound chat/command boundary.
    pub dispatcher: ChatDispatcher,
    pub config: Config,
}

impl AppState {
    /// Start the tailer and the event fan-out task.
    pub fn new(config: Config, sink: Arc<dyn ChatSink>) -> poelog_core::Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let tailer = LogTailer::new(
            config.log_file_path(),
            MessageParser::new(config.chat_markers()),
            Duration::from_millis(config.poll_interval_ms),
            event_tx,
        );
        let messages = tailer.start()?;

        let (events, _) = broadcast::channel(256);
        spawn_event_fanout(event_rx, events.clone());

        Ok(Self {
            messages,
            events,
            dispatcher: ChatDispatcher::new(sink),
            config,
        })
    }
}

/// Forward tailer events onto the broadcast channel for WebSocket clients.
/// Send errors just mean nobody is listening right now.
fn spawn_event_fanout(
    mut event_rx: mpsc::UnboundedReceiver<LogEvent>,
    events: broadcast::Sender<WsServerMessage>,
) {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let msg = match event {
                LogEvent::Initialized => WsServerMessage::Initialized,
                LogEvent::Message(message) => WsServerMessage::NewMessage {
                    message: (*message).clone(),
                },
            };
            let _ = events.send(msg);
        }
    });
}
