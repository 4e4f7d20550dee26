//! Config file loading.

use crate::env::resolve_env_vars_with;
use crate::schema::RelayConfig;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the chatrelay config directory.
/// Priority: `CHATRELAY_CONFIG_DIR` env > `~/.chatrelay/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATRELAY_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".chatrelay"))
        .unwrap_or_else(|| PathBuf::from(".chatrelay"))
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read a YAML config file, substituting `${VAR}` references from `env`.
pub async fn load_config(path: &Path, env: &HashMap<String, String>) -> Result<RelayConfig> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&raw, env)
        .with_context(|| format!("Invalid config at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse YAML text into a typed config.
///
/// Substitution runs on string leaves only; numeric fields take literals.
pub fn parse_config(raw: &str, env: &HashMap<String, String>) -> Result<RelayConfig> {
    if raw.trim().is_empty() {
        return Ok(RelayConfig::default());
    }

    let value: serde_json::Value =
        serde_yaml::from_str(raw).context("Failed to parse config YAML")?;
    if value.is_null() {
        return Ok(RelayConfig::default());
    }

    let value = resolve_env_vars_with(&value, env)?;
    serde_json::from_value(value).context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_secrets() {
        let yaml = r#"
telegram:
  botToken: ${TELEGRAM_TOKEN}
completion:
  apiKey: ${GROQ_API_KEY}
history:
  windowSize: 7
"#;
        let cfg = parse_config(
            yaml,
            &env(&[
                ("TELEGRAM_TOKEN", "123:abc"),
                ("GROQ_API_KEY", "gsk_x"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.bot_token(), Some("123:abc"));
        assert_eq!(cfg.api_key(), Some("gsk_x"));
        assert_eq!(cfg.window_size(), 7);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_config("", &HashMap::new()).unwrap(), RelayConfig::default());
    }

    #[test]
    fn missing_var_fails() {
        let err = parse_config("completion:\n  apiKey: ${NOPE}\n", &HashMap::new()).unwrap_err();
        assert!(format!("{err:#}").contains("NOPE"));
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let err = parse_config("history:\n  windowSize: lots\n", &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize config"));
    }

    #[tokio::test]
    async fn load_missing_file_is_an_error() {
        let err = load_config(Path::new("/definitely/not/here.yaml"), &HashMap::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("chatrelay-config-{}.yaml", std::process::id()));
        tokio::fs::write(&path, "history:\n  retentionCap: 100\n").await.unwrap();

        let cfg = load_config(&path, &HashMap::new()).await.unwrap();
        assert_eq!(cfg.retention_cap(), Some(100));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
