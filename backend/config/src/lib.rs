//! `chatrelay-config`: runtime configuration for the relay.
//!
//! Provides:
//! - Typed config schema (Telegram, completion service, history, assistant, logging)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Environment-only configuration when no file is present
//! - Default value application
//! - Validation report
//! - Config redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use redact::redact;
pub use schema::{
    AssistantConfig, CompletionConfig, HistoryConfig, LoggingConfig, RelayConfig, TelegramConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Load a config for the running process.
///
/// With an explicit `path` the file must exist. Without one, the default
/// `config.yaml` in [`config_dir`] is used when present, otherwise the
/// environment alone. Environment overrides and defaults are applied in both
/// cases. Validation is left to the caller, which usually runs it once
/// logging is up.
pub async fn load_and_prepare(path: Option<&Path>) -> Result<RelayConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();

    let config = match path {
        Some(path) => load_config(path, &env).await?,
        None => {
            let default_path = config_file_path(&config_dir());
            if default_path.exists() {
                load_config(&default_path, &env).await?
            } else {
                debug!("No config file; configuring from environment");
                RelayConfig::default()
            }
        }
    };

    let config = apply_env_overrides(config, &env)?;
    Ok(apply_all_defaults(config))
}
