//! Environment variable handling for config values.
//!
//! Supports `${VAR_NAME}` syntax in string values, resolved at load time.
//! Only uppercase `[A-Z_][A-Z0-9_]*` variable names are matched.
//! `$${VAR}` escapes to a literal `${VAR}`.
//!
//! Also maps the well-known variables (`TELEGRAM_TOKEN`, `GROQ_API_KEY`,
//! `CHATRELAY_*`) onto the typed config.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::schema::{CompletionConfig, HistoryConfig, LoggingConfig, RelayConfig, TelegramConfig};

/// `${VAR}` with an optional leading `$` marking an escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\$)?\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Bot access token for the Telegram channel.
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";

/// Credential for the completion service.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute env vars using a provided map.
///
/// Returns an error if any referenced variable is unset or empty.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let var_name = &caps[2];
        if caps.get(1).is_some() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Layer well-known environment variables over `config`.
///
/// `TELEGRAM_TOKEN` and `GROQ_API_KEY` only fill credentials the config leaves
/// unset. `CHATRELAY_*` variables always win over file values.
pub fn apply_env_overrides(
    mut config: RelayConfig,
    env: &HashMap<String, String>,
) -> Result<RelayConfig> {
    let get = |name: &str| env.get(name).map(String::as_str).filter(|v| !v.is_empty());

    if let Some(token) = get(TELEGRAM_TOKEN_VAR) {
        let telegram = config.telegram.get_or_insert_with(TelegramConfig::default);
        if telegram.bot_token.as_deref().map_or(true, str::is_empty) {
            telegram.bot_token = Some(token.to_string());
        }
    }

    let completion = config.completion.get_or_insert_with(CompletionConfig::default);
    if let Some(key) = get(API_KEY_VAR) {
        if completion.api_key.as_deref().map_or(true, str::is_empty) {
            completion.api_key = Some(key.to_string());
        }
    }
    if let Some(provider) = get("CHATRELAY_PROVIDER") {
        completion.provider = Some(provider.to_string());
    }
    if let Some(model) = get("CHATRELAY_MODEL") {
        completion.model = Some(model.to_string());
    }
    if let Some(url) = get("CHATRELAY_BASE_URL") {
        completion.base_url = Some(url.to_string());
    }
    if let Some(secs) = get("CHATRELAY_TIMEOUT_SECS") {
        completion.timeout_secs = Some(parse_var("CHATRELAY_TIMEOUT_SECS", secs)?);
    }

    if let Some(size) = get("CHATRELAY_WINDOW_SIZE") {
        let history = config.history.get_or_insert_with(HistoryConfig::default);
        history.window_size = Some(parse_var("CHATRELAY_WINDOW_SIZE", size)?);
    }

    if let Some(dir) = get("CHATRELAY_LOG_DIR") {
        let logging = config.logging.get_or_insert_with(LoggingConfig::default);
        logging.dir = Some(PathBuf::from(dir));
    }

    Ok(config)
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for {name}: {raw:?}"))
}
