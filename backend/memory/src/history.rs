//! Append-only chat history keyed by chat id.
//!
//! Reads clone out of the map so no `DashMap` guard outlives a call.

use std::sync::Arc;

use chatrelay_core::ChatId;
use dashmap::DashMap;
use tracing::{debug, trace};

/// Default look-back window: the current message plus the four before it.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Process-lifetime store of past user messages, one ordered list per chat.
///
/// Cloning produces another handle onto the same underlying map.
/// History grows without bound unless a retention cap is configured.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    chats: Arc<DashMap<ChatId, Vec<String>>>,
    retention_cap: Option<usize>,
}

impl HistoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `cap` entries per chat, dropping the oldest first.
    ///
    /// A cap of zero is treated as one: the message just recorded is always kept.
    pub fn with_retention(mut self, cap: usize) -> Self {
        self.retention_cap = Some(cap.max(1));
        self
    }

    pub fn retention_cap(&self) -> Option<usize> {
        self.retention_cap
    }

    /// Append `message` to the chat's history and return up to `window_size - 1`
    /// entries that precede it, oldest first.
    ///
    /// The returned window never contains the message just appended. A chat seen
    /// for the first time starts with an empty history. The append and the read
    /// happen under the chat's map entry, so concurrent calls for the same chat
    /// cannot interleave between them.
    pub fn record_and_window(
        &self,
        chat_id: &ChatId,
        message: impl Into<String>,
        window_size: usize,
    ) -> Vec<String> {
        let mut entry = self.chats.entry(chat_id.clone()).or_default();
        let history = entry.value_mut();
        history.push(message.into());

        if let Some(cap) = self.retention_cap {
            if history.len() > cap {
                let excess = history.len() - cap;
                history.drain(..excess);
                trace!(chat_id = %chat_id, dropped = excess, "Trimmed chat history");
            }
        }

        let end = history.len() - 1;
        let start = end.saturating_sub(window_size.saturating_sub(1));
        let window = history[start..end].to_vec();

        debug!(
            chat_id = %chat_id,
            stored = history.len(),
            window = window.len(),
            "Recorded chat message"
        );
        window
    }

    /// Snapshot of a chat's full history. Unseen chats yield an empty list and
    /// are not created.
    pub fn history(&self, chat_id: &ChatId) -> Vec<String> {
        self.chats
            .get(chat_id)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    /// Number of entries stored for a chat.
    pub fn len(&self, chat_id: &ChatId) -> usize {
        self.chats.get(chat_id).map(|r| r.value().len()).unwrap_or(0)
    }

    /// Whether the chat has no recorded messages.
    pub fn is_empty(&self, chat_id: &ChatId) -> bool {
        self.len(chat_id) == 0
    }

    /// Number of chats with at least one recorded message.
    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }
}
