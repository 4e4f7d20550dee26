//! Config redaction: produce safe-to-share config snapshots by masking secrets.

use serde_json::Value;

/// Keys whose string values are secrets.
static SECRET_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "botToken",
    "bot_token",
    "token",
    "secret",
    "password",
];

/// Redact a config JSON value, replacing secret values with a short hint + `***`.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_string(s: &str, key: &str) -> Value {
    if !is_secret_key(key) || s.is_empty() {
        return Value::String(s.to_string());
    }
    let hint = if s.chars().count() > 8 {
        format!("{}***", s.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    };
    Value::String(hint)
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => redact_string(s, key),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_api_key() {
        let v = json!({ "completion": { "apiKey": "gsk_abcdef123456" } });
        let key = redact(&v)["completion"]["apiKey"].clone();
        assert_eq!(key, "gsk_***");
    }

    #[test]
    fn redacts_bot_token() {
        let v = json!({ "telegram": { "botToken": "1234567890:ABCDEF" } });
        let token = redact(&v)["telegram"]["botToken"].clone();
        assert!(token.as_str().unwrap().ends_with("***"));
        assert!(!token.as_str().unwrap().contains("ABCDEF"));
    }

    #[test]
    fn short_secrets_are_fully_masked() {
        let v = json!({ "apiKey": "abc" });
        assert_eq!(redact(&v)["apiKey"], "***");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({ "logging": { "level": "debug" }, "history": { "windowSize": 5 } });
        assert_eq!(redact(&v), v);
    }
}
