use serde::{Deserialize, Serialize};

use crate::types::ChatId;

/// An inbound chat-platform event the relay reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// The `/start` command. Carries no payload.
    Start { chat_id: ChatId },
    /// Any other text message.
    Text { chat_id: ChatId, text: String },
}

impl InboundEvent {
    pub fn chat_id(&self) -> &ChatId {
        match self {
            Self::Start { chat_id } | Self::Text { chat_id, .. } => chat_id,
        }
    }

    /// Classify a raw text message from a source without a bot username.
    ///
    /// Only the bare `/start` command (any letter case) greets.
    pub fn from_text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self::from_text_for(chat_id, text, None)
    }

    /// Classify a raw text message addressed to the bot `bot_username`.
    ///
    /// The first token `/start`, compared case-insensitively, is the start
    /// command. `/start@name` counts only when `name` is this bot. Everything
    /// else, other slash commands and other bots' `/start` included, is text.
    pub fn from_text_for(
        chat_id: ChatId,
        text: impl Into<String>,
        bot_username: Option<&str>,
    ) -> Self {
        let text = text.into();
        if is_start_command(&text, bot_username) {
            Self::Start { chat_id }
        } else {
            Self::Text { chat_id, text }
        }
    }
}

fn is_start_command(text: &str, bot_username: Option<&str>) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let (command, target) = match first.split_once('@') {
        Some((command, target)) => (command, Some(target)),
        None => (first, None),
    };
    if !command.eq_ignore_ascii_case("/start") {
        return false;
    }
    match (target, bot_username) {
        (None, _) => true,
        (Some(target), Some(me)) => target.eq_ignore_ascii_case(me.trim_start_matches('@')),
        (Some(_), None) => false,
    }
}
