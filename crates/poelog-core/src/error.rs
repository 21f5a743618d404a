//! Error types for poelog.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoelogError {
    #[error("Watch error: {0}")]
    Watch(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Channel send error")]
    ChannelSend,
}
