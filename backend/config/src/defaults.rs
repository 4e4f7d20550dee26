//! Config defaults: applies the relay's default values to a parsed config.

use crate::schema::{CompletionConfig, HistoryConfig, LoggingConfig, RelayConfig};

pub const DEFAULT_PROVIDER: &str = "groq";

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const DEFAULT_TOP_P: f32 = 1.0;

/// Max output length of one completion.
pub const DEFAULT_MAX_TOKENS: u32 = 4080;

/// Upper bound on one completion call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// History look-back window, current message included.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: RelayConfig) -> RelayConfig {
    let config = apply_completion_defaults(config);
    let config = apply_history_defaults(config);
    apply_logging_defaults(config)
}

fn apply_completion_defaults(mut config: RelayConfig) -> RelayConfig {
    let completion = config.completion.get_or_insert_with(CompletionConfig::default);
    completion.provider.get_or_insert_with(|| DEFAULT_PROVIDER.to_string());
    completion.base_url.get_or_insert_with(|| DEFAULT_BASE_URL.to_string());
    completion.model.get_or_insert_with(|| DEFAULT_MODEL.to_string());
    completion.temperature.get_or_insert(DEFAULT_TEMPERATURE);
    completion.top_p.get_or_insert(DEFAULT_TOP_P);
    completion.max_tokens.get_or_insert(DEFAULT_MAX_TOKENS);
    completion.timeout_secs.get_or_insert(DEFAULT_TIMEOUT_SECS);
    config
}

fn apply_history_defaults(mut config: RelayConfig) -> RelayConfig {
    let history = config.history.get_or_insert_with(HistoryConfig::default);
    history.window_size.get_or_insert(DEFAULT_WINDOW_SIZE);
    history.with_context.get_or_insert(true);
    config
}

fn apply_logging_defaults(mut config: RelayConfig) -> RelayConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(RelayConfig::default());
        let completion = cfg.completion.unwrap();
        assert_eq!(completion.model.as_deref(), Some(DEFAULT_MODEL));
        assert_eq!(completion.max_tokens, Some(4080));
        assert_eq!(completion.timeout_secs, Some(60));
        assert_eq!(cfg.history.unwrap().window_size, Some(5));
        assert_eq!(cfg.logging.unwrap().level.as_deref(), Some("info"));
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = RelayConfig::default();
        cfg.history = Some(HistoryConfig {
            window_size: Some(9),
            with_context: Some(false),
            ..Default::default()
        });
        let cfg = apply_all_defaults(cfg);
        let history = cfg.history.unwrap();
        assert_eq!(history.window_size, Some(9));
        assert_eq!(history.with_context, Some(false));
        assert!(history.retention_cap.is_none());
    }

    #[test]
    fn secrets_stay_unset() {
        let cfg = apply_all_defaults(RelayConfig::default());
        assert!(cfg.api_key().is_none());
        assert!(cfg.telegram.is_none());
    }
}
