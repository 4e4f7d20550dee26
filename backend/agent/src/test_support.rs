use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chatrelay_core::{ChatId, ReplySink};

/// Captures every outbound message.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(ChatId, String)>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat_id.clone(), text.to_string()));
        Ok(())
    }
}

/// Rejects every outbound message.
pub struct FailingSink;

#[async_trait]
impl ReplySink for FailingSink {
    async fn send_text(&self, _chat_id: &ChatId, _text: &str) -> Result<()> {
        anyhow::bail!("Forbidden: bot was blocked by the user")
    }
}
