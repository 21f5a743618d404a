//! Shared types for the poelog companion service.

mod action;
mod channel;
mod message;
mod ws;

pub use action::*;
pub use channel::*;
pub use message::*;
pub use ws::*;
