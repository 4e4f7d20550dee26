use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one conversation thread on the chat platform.
///
/// Only ever used as a lookup key. Telegram chat ids are numeric, the console
/// adapter uses an arbitrary label, so the id is kept as its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ChatId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChatId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Fixed decoding parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
            max_tokens: 4080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_compare_by_string_form() {
        assert_eq!(ChatId::from(42_i64), ChatId::from("42"));
        assert_ne!(ChatId::from(-42_i64), ChatId::from("42"));
        assert_eq!(ChatId::new("console").to_string(), "console");
    }

    #[test]
    fn chat_id_serializes_transparently() {
        let json = serde_json::to_string(&ChatId::from(7_i64)).unwrap();
        assert_eq!(json, "\"7\"");
    }

    #[test]
    fn default_decoding_params() {
        let params = DecodingParams::default();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_p, 1.0);
        assert_eq!(params.max_tokens, 4080);
    }
}
