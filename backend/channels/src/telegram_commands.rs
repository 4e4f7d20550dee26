//! Telegram update classification.
//!
//! `/start` (any case, also as `/start@<this bot>`) greets; any other text,
//! other slash commands and other bots' `/start` included, goes through the
//! relay. Updates without text are dropped.

use chatrelay_core::{ChatId, InboundEvent};

/// Telegram rejects messages longer than this many UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Map a Telegram message to a relay event.
pub fn inbound_event(
    chat_id: i64,
    text: Option<&str>,
    bot_username: Option<&str>,
) -> Option<InboundEvent> {
    text.map(|text| InboundEvent::from_text_for(ChatId::from(chat_id), text, bot_username))
}

/// Split `text` into pieces Telegram accepts, preferring newline boundaries.
///
/// Concatenating the pieces gives back `text` exactly.
pub fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;

    while utf16_len(rest) > max_len {
        let mut cut = 0;
        let mut units = 0;
        let mut last_newline = None;
        for (idx, ch) in rest.char_indices() {
            units += ch.len_utf16();
            if units > max_len {
                break;
            }
            cut = idx + ch.len_utf8();
            if ch == '\n' {
                last_newline = Some(cut);
            }
        }
        let cut = match last_newline.unwrap_or(cut) {
            0 => rest.chars().next().map_or(rest.len(), char::len_utf8),
            cut => cut,
        };
        let (head, tail) = rest.split_at(cut);
        parts.push(head);
        rest = tail;
    }

    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest);
    }
    parts
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}
