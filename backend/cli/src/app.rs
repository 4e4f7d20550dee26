//! Wiring: config -> provider -> gateway -> relay.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chatrelay_agent::{AssistantIdentity, ChatRelay, PromptComposer, PromptMode};
use chatrelay_config::{validate, RelayConfig};
use chatrelay_core::{DecodingParams, LlmProvider};
use chatrelay_memory::HistoryStore;
use chatrelay_providers::{CompletionGateway, MockProvider, OpenAiCompatProvider};
use tracing::{error, info, warn};

/// Load a `.env` file into the process environment.
///
/// With no `path`, `.env` is looked up from the working directory upwards.
/// Variables that are already set keep their value. A missing file is not an
/// error; a malformed one is.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("failed to read .env file"),
    }
}

/// Build the relay described by `config`.
pub fn build_relay(config: &RelayConfig) -> Result<ChatRelay> {
    let provider: Arc<dyn LlmProvider> = if config.provider() == "mock" {
        info!("Using mock completion provider");
        Arc::new(MockProvider::new("mock"))
    } else {
        let api_key = config
            .api_key()
            .context("Completion API key is not set (GROQ_API_KEY)")?;
        info!(provider = %config.provider(), base_url = %config.base_url(), "Using completion provider");
        Arc::new(
            OpenAiCompatProvider::new(api_key)
                .with_base_url(config.base_url())
                .with_name(config.provider()),
        )
    };

    let gateway = CompletionGateway::new(provider, config.model())
        .with_params(DecodingParams {
            temperature: config.temperature(),
            top_p: config.top_p(),
            max_tokens: config.max_tokens(),
        })
        .with_timeout(config.timeout());

    let history = match config.retention_cap() {
        Some(cap) => HistoryStore::new().with_retention(cap),
        None => HistoryStore::new(),
    };

    let composer = config
        .persona()
        .map(|persona| PromptComposer::new(AssistantIdentity::new(persona)))
        .unwrap_or_default();

    Ok(ChatRelay::new(history, gateway)
        .with_composer(composer)
        .with_mode(PromptMode::from_flag(config.with_context()))
        .with_window_size(config.window_size()))
}

/// Log the validation report and fail on errors.
pub fn check_config(config: &RelayConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("invalid configuration: {}", report.error_summary());
    }
    Ok(())
}

/// Switch the config to the mock provider.
pub fn use_mock_provider(config: &mut RelayConfig) {
    config
        .completion
        .get_or_insert_with(Default::default)
        .provider = Some("mock".to_string());
}
