//! Log tailing, parsing, and outbound composition for poelog.

mod compose;
mod error;
mod parser;
mod splitter;
mod tailer;

pub use compose::{compose_action, compose_chat, ChatDispatcher, ChatSink, LogSink, RecordingSink};
pub use error::PoelogError;
pub use parser::{ChatMarkers, MessageParser};
pub use splitter::LineSplitter;
pub use tailer::{LogEvent, LogTailer, LogTailerHandle};

/// Result type for poelog operations.
pub type Result<T> = std::result::Result<T, PoelogError>;
