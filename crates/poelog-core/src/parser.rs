//! Classification of log lines into structured messages.
//!
//! Three layered grammars, all whole-line anchored:
//! 1. the log envelope (timestamp, sequence id, code, type tag, client id),
//! 2. the chat envelope inside the contents (channel prefix, whisper
//!    direction marker, guild tag, subject),
//! 3. the trade-request template inside a chat body.
//!
//! A line that fails layer 1 produces no message at all. Layers 2 and 3 are
//! refinements: failing them just leaves the message less specific.

use once_cell::sync::Lazy;
use poelog_types::{Channel, Message, MessageType, Subtype, TradeInfo, LOG_TIME_FORMAT};
use regex::Regex;
use tracing::debug;

/// Envelope of every log line the game client writes.
static ENVELOPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}) (\d+) ([0-9a-f]+) \[(\S+) Client (\d+)\] (.*)$",
    )
    .expect("envelope regex")
});

/// Trade-request template the game emits for stash listings.
static TRADE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^Hi, I would like to buy your (.+) listed for ([0-9.]+) (\S+) in (.+) \(stash tab "([^"]*)"; position: left ?(\d+), top ?(\d+)\)$"#,
    )
    .expect("trade regex")
});

/// Whisper direction markers.
///
/// The game localizes these with the client language, so they cannot be
/// hard-coded; a client running in another language needs them overridden
/// from configuration.
#[derive(Debug, Clone)]
pub struct ChatMarkers {
    /// Marker on whispers received from another player.
    pub incoming: String,
    /// Marker on whispers sent to another player.
    pub outgoing: String,
}

impl Default for ChatMarkers {
    fn default() -> Self {
        Self {
            incoming: "From ".to_string(),
            outgoing: "To ".to_string(),
        }
    }
}

/// Parses decoded log lines into [`Message`]s.
#[derive(Debug)]
pub struct MessageParser {
    chat_re: Regex,
    markers: ChatMarkers,
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new(ChatMarkers::default())
    }
}

impl MessageParser {
    pub fn new(markers: ChatMarkers) -> Self {
        let chat_re = Regex::new(&format!(
            r"^([#$%&@])?({}|{})?(?:<([^>]+)> )?([^\s:]*): (.*)$",
            regex::escape(&markers.incoming),
            regex::escape(&markers.outgoing),
        ))
        .expect("chat regex");
        Self { chat_re, markers }
    }

    /// Classify one line. Returns `None` for lines that don't match the
    /// envelope; that is a diagnostic, not an error.
    pub fn parse_line(&self, line: &str) -> Option<Message> {
        let caps = match ENVELOPE_RE.captures(line) {
            Some(caps) => caps,
            None => {
                debug!(target: "poelog::parser", "Line not recognized as a message: {}", line);
                return None;
            }
        };

        let timestamp =
            chrono::NaiveDateTime::parse_from_str(&caps[1], LOG_TIME_FORMAT).ok()?;
        let sequence_id: u64 = caps[2].parse().ok()?;
        let code = u64::from_str_radix(&caps[3], 16).ok()? as u16;
        let message_type = MessageType::from_tag(&caps[4]);
        let client_id: u32 = caps[5].parse().ok()?;
        let contents = &caps[6];

        let mut message = Message {
            timestamp,
            sequence_id,
            code,
            message_type,
            client_id,
            contents: contents.to_string(),
            subtype: Subtype::Log,
            channel: Channel::Invalid,
            subject: String::new(),
            subject_group: String::new(),
            is_incoming: false,
            trade: None,
        };

        if let Some(chat) = self.chat_re.captures(contents) {
            let subject = chat.get(4).map_or("", |m| m.as_str());
            let body = chat.get(5).map_or("", |m| m.as_str());
            message.subject = subject.to_string();
            message.subject_group = chat.get(3).map_or(String::new(), |m| m.as_str().to_string());
            message.contents = body.to_string();
            if subject.is_empty() {
                message.subtype = Subtype::Event;
            } else {
                message.subtype = Subtype::Chat;
                let prefix = chat.get(1).and_then(|m| m.as_str().chars().next());
                message.channel = Channel::from_prefix(prefix);
                if message.channel == Channel::Whisper {
                    let marker = chat.get(2).map_or("", |m| m.as_str());
                    message.is_incoming = marker != self.markers.outgoing;
                }
                message.trade = parse_trade(body);
            }
        }

        Some(message)
    }
}

/// Match a chat body against the trade-request template. Most chat messages
/// are not trade requests; a non-match is expected.
fn parse_trade(body: &str) -> Option<TradeInfo> {
    let caps = TRADE_RE.captures(body)?;
    Some(TradeInfo {
        item: caps[1].to_string(),
        amount: caps[2].parse().ok()?,
        currency: caps[3].to_string(),
        league: caps[4].to_string(),
        tab: caps[5].to_string(),
        left: caps[6].parse().ok()?,
        top: caps[7].parse().ok()?,
    })
}
