//! Log Redaction Layer
//!
//! Scrubs bot tokens, API keys, bearer tokens, and phone numbers from strings
//! prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static BOT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5,12}:[A-Za-z0-9_-]{30,}").unwrap());
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:gsk_|sk-)[A-Za-z0-9_-]{20,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    // Tokens first: they contain digit runs the phone pattern would split.
    let redacted = BOT_TOKEN_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = API_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]");
    TELEPHONE_RE
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_phone_and_bearer() {
        let raw = "Sending to +1-555-123-4567 with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("+1-555-123-4567"));
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
    }

    #[test]
    fn redacts_bot_token_and_api_key() {
        let raw = "token 123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw key gsk_abcdefghijklmnopqrstuvwx12";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw"));
        assert!(!clean.contains("gsk_abcdefghijklmnopqrstuvwx12"));
        assert_eq!(clean.matches("[REDACTED_TOKEN]").count(), 2);
    }

    #[test]
    fn leaves_ordinary_text_alone() {
        let raw = "had a great day at the beach 🏖️";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
