//! Structured log messages.
//!
//! A [`Message`] is the normalized form of one line from the game client's
//! log file. It is constructed once by the parser and never mutated;
//! downstream consumers (history, WebSocket relay, filters) only read it.

use crate::Channel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used by the game client log.
pub const LOG_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Severity tag from the log envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Info,
    Debug,
    Warn,
    /// The envelope carried a tag we don't know about.
    Invalid,
}

impl MessageType {
    /// The tag text as it appears in the envelope.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Info => "INFO",
            MessageType::Debug => "DEBUG",
            MessageType::Warn => "WARN",
            MessageType::Invalid => "INVALID",
        }
    }

    /// Resolve a type from its envelope tag. Unknown tags are Invalid, not
    /// an error; only envelope-shape failures abort parsing.
    pub fn from_tag(tag: &str) -> MessageType {
        match tag {
            "INFO" => MessageType::Info,
            "DEBUG" => MessageType::Debug,
            "WARN" => MessageType::Warn,
            _ => MessageType::Invalid,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the envelope contents were classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subtype {
    /// Matched the chat grammar with a non-empty subject.
    Chat,
    /// Matched the chat grammar with an empty subject (server broadcasts,
    /// "Player has been disconnected" and the like).
    Event,
    /// Did not match the chat grammar at all.
    Log,
}

/// Structured fields extracted from a trade-request whisper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInfo {
    /// Name of the listed item.
    pub item: String,
    /// Amount of currency asked for.
    pub amount: f64,
    /// Currency abbreviation ("chaos", "divine", …).
    pub currency: String,
    /// League the listing is in.
    pub league: String,
    /// Stash tab holding the item.
    pub tab: String,
    /// Column of the item in the tab, from the left.
    pub left: u32,
    /// Row of the item in the tab, from the top.
    pub top: u32,
}

/// One parsed log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Timestamp from the envelope.
    pub timestamp: NaiveDateTime,
    /// Per-line sequence id from the envelope, monotonically increasing.
    pub sequence_id: u64,
    /// Hexadecimal code field from the envelope.
    pub code: u16,
    /// Severity tag.
    pub message_type: MessageType,
    /// Which game client instance produced the line.
    pub client_id: u32,
    /// For Chat/Event: the message body after the chat envelope is
    /// stripped. For Log: everything after the log envelope, verbatim.
    pub contents: String,
    /// Classification of the contents.
    pub subtype: Subtype,
    /// Channel the message was sent on. Invalid unless subtype is Chat.
    pub channel: Channel,
    /// Player name the message is from (or to, for outgoing whispers).
    /// Empty unless subtype is Chat.
    pub subject: String,
    /// Guild tag attached to the subject, if any.
    pub subject_group: String,
    /// Whisper direction. Only meaningful for the Whisper channel; true
    /// unless the chat envelope carried the outgoing marker.
    pub is_incoming: bool,
    /// Present only when a Chat message matched the trade-request pattern.
    pub trade: Option<TradeInfo>,
}

impl Message {
    /// Subject with its guild tag, as the game renders senders.
    pub fn full_sender(&self) -> String {
        if self.subject_group.is_empty() {
            self.subject.clone()
        } else {
            format!("<{}> {}", self.subject_group, self.subject)
        }
    }

    /// Re-compose the contents field of the original line, chat envelope
    /// included.
    pub fn full_contents(&self) -> String {
        match self.subtype {
            Subtype::Chat => {
                let mut out = String::new();
                if let Some(prefix) = self.channel.prefix() {
                    out.push(prefix);
                }
                if self.channel == Channel::Whisper {
                    out.push_str(if self.is_incoming { "From " } else { "To " });
                }
                out.push_str(&self.full_sender());
                out.push_str(": ");
                out.push_str(&self.contents);
                out
            }
            Subtype::Event => format!(": {}", self.contents),
            Subtype::Log => self.contents.clone(),
        }
    }

    /// Re-compose the full log line this message was parsed from. The
    /// result parses back to an equal message.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {:x} [{} Client {}] {}",
            self.timestamp.format(LOG_TIME_FORMAT),
            self.sequence_id,
            self.code,
            self.message_type,
            self.client_id,
            self.full_contents()
        )
    }

    /// The player to whisper back to, for incoming whispers.
    pub fn reply_target(&self) -> Option<&str> {
        if self.channel == Channel::Whisper && self.is_incoming {
            Some(&self.subject)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base_message() -> Message {
        Message {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 7)
                .unwrap()
                .and_hms_opt(21, 14, 59)
                .unwrap(),
            sequence_id: 432109,
            code: 0x19,
            message_type: MessageType::Info,
            client_id: 7620,
            contents: "hey, got a minute?".into(),
            subtype: Subtype::Chat,
            channel: Channel::Whisper,
            subject: "Bob".into(),
            subject_group: String::new(),
            is_incoming: true,
            trade: None,
        }
    }

    #[test]
    fn test_full_sender_with_guild() {
        let mut msg = base_message();
        msg.subject_group = "Harbingers".into();
        assert_eq!(msg.full_sender(), "<Harbingers> Bob");
    }

    #[test]
    fn test_full_contents_incoming_whisper() {
        let msg = base_message();
        assert_eq!(msg.full_contents(), "@From Bob: hey, got a minute?");
    }

    #[test]
    fn test_full_contents_event() {
        let mut msg = base_message();
        msg.subtype = Subtype::Event;
        msg.channel = Channel::Invalid;
        msg.subject.clear();
        msg.contents = "Bob has been disconnected.".into();
        assert_eq!(msg.full_contents(), ": Bob has been disconnected.");
    }

    #[test]
    fn test_to_line() {
        let msg = base_message();
        assert_eq!(
            msg.to_line(),
            "2024/03/07 21:14:59 432109 19 [INFO Client 7620] @From Bob: hey, got a minute?"
        );
    }

    #[test]
    fn test_reply_target() {
        let msg = base_message();
        assert_eq!(msg.reply_target(), Some("Bob"));

        let mut outgoing = base_message();
        outgoing.is_incoming = false;
        assert_eq!(outgoing.reply_target(), None);
    }

    #[test]
    fn test_type_tag_round_trip() {
        for t in [MessageType::Info, MessageType::Debug, MessageType::Warn] {
            assert_eq!(MessageType::from_tag(t.as_str()), t);
        }
        assert_eq!(MessageType::from_tag("FATAL"), MessageType::Invalid);
    }
}
