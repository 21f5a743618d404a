//! Outbound message composition.
//!
//! The core composes a single string for the game's chat box; actually
//! getting it into the game window (clipboard + synthesized input on
//! Windows) is a pluggable [`ChatSink`] backend.

use crate::Result;
use poelog_types::{Action, Channel};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Compose the chat-box text for a message on the given channel.
///
/// The channel prefix is omitted for Local; whispers put the target name
/// between the prefix and the text.
pub fn compose_chat(channel: Channel, text: &str, target: Option<&str>) -> String {
    let mut out = String::new();
    if channel != Channel::Local {
        if let Some(prefix) = channel.prefix() {
            out.push(prefix);
        }
    }
    if channel == Channel::Whisper {
        if let Some(target) = target {
            out.push_str(target);
            out.push(' ');
        }
    }
    out.push_str(text);
    out
}

/// Compose the chat-box text for a slash command.
pub fn compose_action(action: Action, args: Option<&str>) -> String {
    match args {
        Some(args) if !args.is_empty() => format!("/{} {}", action.command(), args),
        _ => format!("/{}", action.command()),
    }
}

/// Delivers composed text to the game client.
///
/// The real backend steals focus and synthesizes keystrokes; tests and
/// headless deployments plug in something tamer.
pub trait ChatSink: Send + Sync {
    fn deliver(&self, text: &str) -> Result<()>;
}

/// Sink that only logs what would have been sent.
#[derive(Debug, Default)]
pub struct LogSink;

impl ChatSink for LogSink {
    fn deliver(&self, text: &str) -> Result<()> {
        info!(target: "poelog::compose", "Would deliver to game: {}", text);
        Ok(())
    }
}

/// Sink that records delivered text, for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

impl ChatSink for RecordingSink {
    fn deliver(&self, text: &str) -> Result<()> {
        self.delivered.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Composes outbound chat and commands and hands them to the sink.
#[derive(Clone)]
pub struct ChatDispatcher {
    sink: Arc<dyn ChatSink>,
}

impl ChatDispatcher {
    pub fn new(sink: Arc<dyn ChatSink>) -> Self {
        Self { sink }
    }

    /// Send a chat message on a channel, with an optional whisper target.
    pub fn send_chat(&self, channel: Channel, text: &str, target: Option<&str>) -> Result<()> {
        self.sink.deliver(&compose_chat(channel, text, target))
    }

    /// Send a slash command with an optional argument string.
    pub fn send_action(&self, action: Action, args: Option<&str>) -> Result<()> {
        self.sink.deliver(&compose_action(action, args))
    }
}
