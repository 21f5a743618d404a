//! Chat channel vocabulary.
//!
//! The game prefixes chat lines with a single character identifying the
//! channel a message was sent on. These mappings are exact inverses of each
//! other, except that an unrecognized prefix resolves to [`Channel::Invalid`]
//! rather than failing.

use serde::{Deserialize, Serialize};

/// A chat channel in the game client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Say chat, visible to players in the same area. No prefix.
    Local,
    /// Global chat (`#`).
    Global,
    /// Party chat (`%`).
    Party,
    /// Trade chat (`$`).
    Trade,
    /// Guild chat (`&`).
    Guild,
    /// Direct whisper to or from another player (`@`).
    Whisper,
    /// Unrecognized prefix.
    Invalid,
}

impl Channel {
    /// Channels in the order UI surfaces present them.
    pub const ALL: [Channel; 6] = [
        Channel::Global,
        Channel::Trade,
        Channel::Guild,
        Channel::Party,
        Channel::Local,
        Channel::Whisper,
    ];

    /// The single-character prefix the game uses for this channel.
    /// `None` for Local (no prefix); `'!'` for Invalid.
    pub fn prefix(self) -> Option<char> {
        match self {
            Channel::Local => None,
            Channel::Global => Some('#'),
            Channel::Party => Some('%'),
            Channel::Trade => Some('$'),
            Channel::Guild => Some('&'),
            Channel::Whisper => Some('@'),
            Channel::Invalid => Some('!'),
        }
    }

    /// Resolve a channel from its prefix character. `None` means no prefix
    /// was present, which is Local chat. Anything unrecognized is Invalid.
    pub fn from_prefix(prefix: Option<char>) -> Channel {
        match prefix {
            None => Channel::Local,
            Some('#') => Channel::Global,
            Some('%') => Channel::Party,
            Some('$') => Channel::Trade,
            Some('&') => Channel::Guild,
            Some('@') => Channel::Whisper,
            Some(_) => Channel::Invalid,
        }
    }

    /// Stable string name, used in settings and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Local => "Local",
            Channel::Global => "Global",
            Channel::Party => "Party",
            Channel::Trade => "Trade",
            Channel::Guild => "Guild",
            Channel::Whisper => "Whisper",
            Channel::Invalid => "Invalid",
        }
    }

    /// Resolve a channel from its stable string name.
    pub fn from_name(name: &str) -> Channel {
        match name {
            "Local" => Channel::Local,
            "Global" => Channel::Global,
            "Party" => Channel::Party,
            "Trade" => Channel::Trade,
            "Guild" => Channel::Guild,
            "Whisper" => Channel::Whisper,
            _ => Channel::Invalid,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_prefix(channel.prefix()), channel);
        }
    }

    #[test]
    fn test_name_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_name(channel.as_str()), channel);
        }
        assert_eq!(Channel::from_name("Invalid"), Channel::Invalid);
    }

    #[test]
    fn test_unknown_prefix_is_invalid() {
        assert_eq!(Channel::from_prefix(Some('?')), Channel::Invalid);
        assert_eq!(Channel::Invalid.prefix(), Some('!'));
    }

    #[test]
    fn test_local_has_no_prefix() {
        assert_eq!(Channel::Local.prefix(), None);
        assert_eq!(Channel::from_prefix(None), Channel::Local);
    }
}
