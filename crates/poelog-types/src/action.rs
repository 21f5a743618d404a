//! Slash-command vocabulary.
//!
//! The game exposes a fixed set of chat commands (`/hideout`, `/whois`, …).
//! Each [`Action`] maps to exactly one command keyword; the mapping is
//! bidirectional and unknown keywords resolve to `None`.

use serde::{Deserialize, Serialize};

/// An in-game slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Bug,
    Ladder,
    Played,
    Age,
    Passives,
    Deaths,
    Remaining,
    Pvp,
    FixMyHelmet,
    Oos,
    Dance,
    Status,
    Debug,
    Invite,
    Kick,
    PartyDescription,
    TradeWith,
    Friend,
    Unfriend,
    Accept,
    Ignore,
    Unignore,
    ClearIgnoreList,
    Whois,
    Afk,
    AfkOff,
    Dnd,
    Global,
    Trade,
    Cls,
    Hideout,
    Menagerie,
    AbandonDaily,
    Exit,
    ResetXp,
    RecheckAchievements,
    Autoreply,
}

/// Actions paired with their command keywords, in the game's canonical order.
const COMMANDS: &[(Action, &str)] = &[
    (Action::Bug, "bug"),
    (Action::Ladder, "ladder"),
    (Action::Played, "played"),
    (Action::Age, "age"),
    (Action::Passives, "passives"),
    (Action::Deaths, "deaths"),
    (Action::Remaining, "remaining"),
    (Action::Pvp, "pvp"),
    (Action::FixMyHelmet, "fixmyhelmet"),
    (Action::Oos, "oos"),
    (Action::Dance, "dance"),
    (Action::Status, "status"),
    (Action::Debug, "debug"),
    (Action::Invite, "invite"),
    (Action::Kick, "kick"),
    (Action::PartyDescription, "party_description"),
    (Action::TradeWith, "tradewith"),
    (Action::Friend, "friend"),
    (Action::Unfriend, "unfriend"),
    (Action::Accept, "accept"),
    (Action::Ignore, "ignore"),
    (Action::Unignore, "unignore"),
    (Action::ClearIgnoreList, "clear_ignore_list"),
    (Action::Whois, "whois"),
    (Action::Afk, "afk"),
    (Action::AfkOff, "afkoff"),
    (Action::Dnd, "dnd"),
    (Action::Global, "global"),
    (Action::Trade, "trade"),
    (Action::Cls, "cls"),
    (Action::Hideout, "hideout"),
    (Action::Menagerie, "menagerie"),
    (Action::AbandonDaily, "abandon_daily"),
    (Action::Exit, "exit"),
    (Action::ResetXp, "reset_xp"),
    (Action::RecheckAchievements, "recheck_achievements"),
    (Action::Autoreply, "autoreply"),
];

impl Action {
    /// Every known action, in canonical order.
    pub fn all() -> impl Iterator<Item = Action> {
        COMMANDS.iter().map(|(action, _)| *action)
    }

    /// The command keyword for this action (without the leading slash).
    pub fn command(self) -> &'static str {
        // COMMANDS covers every variant; the lookup cannot miss.
        COMMANDS
            .iter()
            .find(|(action, _)| *action == self)
            .map(|(_, command)| *command)
            .unwrap_or("")
    }

    /// Resolve an action from its command keyword.
    pub fn from_command(command: &str) -> Option<Action> {
        COMMANDS
            .iter()
            .find(|(_, keyword)| *keyword == command)
            .map(|(action, _)| *action)
    }

    /// `Ignore` in the game's own help text.
    pub fn squelch() -> Action {
        Action::Ignore
    }

    /// `Unignore` in the game's own help text.
    pub fn unsquelch() -> Action {
        Action::Unignore
    }
}
