use anyhow::Result;
use async_trait::async_trait;

use crate::types::{ChatId, DecodingParams};

/// A hosted text-completion service.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "groq", "mock").
    fn name(&self) -> &str;

    /// Send a completion request and return the top choice's text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Outbound side of a chat channel.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Deliver `text` to `chat_id` verbatim.
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()>;
}

/// Request to an LLM provider: one system message and one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub params: DecodingParams,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}
