//! Relay configuration schema.
//!
//! Every field is optional on disk; [`crate::defaults`] fills the gaps and the
//! accessor methods fall back to the same defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::defaults::{
    DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_PROVIDER,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, DEFAULT_TOP_P, DEFAULT_WINDOW_SIZE,
};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<TelegramConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant: Option<AssistantConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
}

/// The external completion service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionConfig {
    /// Provider label: "groq", "openai", any OpenAI-compatible name, or "mock".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Look-back window including the current message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    /// Max stored messages per chat. Unbounded when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_cap: Option<usize>,
    /// Embed recent messages in the prompt (true) or ask for more detail (false).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_context: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantConfig {
    /// Replaces the built-in persona paragraph. Mode instructions are kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling JSON log files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl RelayConfig {
    pub fn bot_token(&self) -> Option<&str> {
        self.telegram
            .as_ref()
            .and_then(|t| t.bot_token.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.completion()
            .and_then(|c| c.api_key.as_deref())
            .filter(|k| !k.is_empty())
    }

    pub fn provider(&self) -> &str {
        self.completion()
            .and_then(|c| c.provider.as_deref())
            .unwrap_or(DEFAULT_PROVIDER)
    }

    pub fn base_url(&self) -> &str {
        self.completion()
            .and_then(|c| c.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn model(&self) -> &str {
        self.completion()
            .and_then(|c| c.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
    }

    pub fn temperature(&self) -> f32 {
        self.completion()
            .and_then(|c| c.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn top_p(&self) -> f32 {
        self.completion().and_then(|c| c.top_p).unwrap_or(DEFAULT_TOP_P)
    }

    pub fn max_tokens(&self) -> u32 {
        self.completion()
            .and_then(|c| c.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.completion()
                .and_then(|c| c.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn window_size(&self) -> usize {
        self.history
            .as_ref()
            .and_then(|h| h.window_size)
            .unwrap_or(DEFAULT_WINDOW_SIZE)
    }

    pub fn retention_cap(&self) -> Option<usize> {
        self.history.as_ref().and_then(|h| h.retention_cap)
    }

    pub fn with_context(&self) -> bool {
        self.history
            .as_ref()
            .and_then(|h| h.with_context)
            .unwrap_or(true)
    }

    pub fn persona(&self) -> Option<&str> {
        self.assistant.as_ref().and_then(|a| a.persona.as_deref())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.logging.as_ref().and_then(|l| l.dir.as_ref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    fn completion(&self) -> Option<&CompletionConfig> {
        self.completion.as_ref()
    }
}
