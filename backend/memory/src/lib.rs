//! Per-chat conversation history.
//!
//! The relay keeps the literal text of every inbound user message, grouped by
//! chat, and feeds a bounded look-back window of it into each new prompt.

pub mod history;

pub use history::{HistoryStore, DEFAULT_WINDOW_SIZE};
