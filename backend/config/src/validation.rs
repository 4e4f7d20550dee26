//! Config validation with user-friendly error messages.

use crate::schema::RelayConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// One line per error, for surfacing through `anyhow`.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
///
/// A missing Telegram token is only a warning here: the console channel runs
/// without one. The `run` command enforces it.
pub fn validate(config: &RelayConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_completion(config, &mut report);
    validate_history(config, &mut report);
    validate_telegram(config, &mut report);
    report
}

fn validate_completion(config: &RelayConfig, report: &mut ValidationReport) {
    if config.provider() != "mock" && config.api_key().is_none() {
        report.error(
            "completion.apiKey",
            "Completion API key is required (set GROQ_API_KEY)",
        );
    }
    if config.model().trim().is_empty() {
        report.error("completion.model", "Model cannot be empty");
    }
    if config.base_url().trim().is_empty() {
        report.error("completion.baseUrl", "Base URL cannot be empty");
    } else if !config.base_url().starts_with("http://") && !config.base_url().starts_with("https://") {
        report.error("completion.baseUrl", "Base URL must start with http:// or https://");
    }

    let temperature = config.temperature();
    if !(0.0..=2.0).contains(&temperature) {
        report.error(
            "completion.temperature",
            format!("temperature must be within [0, 2], got {temperature}"),
        );
    }
    let top_p = config.top_p();
    if !(top_p > 0.0 && top_p <= 1.0) {
        report.error(
            "completion.topP",
            format!("topP must be within (0, 1], got {top_p}"),
        );
    }
    if config.max_tokens() == 0 {
        report.error("completion.maxTokens", "maxTokens must be >= 1");
    }
    if config.timeout().is_zero() {
        report.error("completion.timeoutSecs", "timeoutSecs must be >= 1");
    }
}

fn validate_history(config: &RelayConfig, report: &mut ValidationReport) {
    let window = config.window_size();
    if window == 0 {
        report.error("history.windowSize", "windowSize must be >= 1");
    }
    if let Some(cap) = config.retention_cap() {
        if cap == 0 {
            report.error("history.retentionCap", "retentionCap must be >= 1");
        } else if cap < window {
            report.warn(
                "history.retentionCap",
                format!("retentionCap {cap} is smaller than windowSize {window}; prompts will see fewer past messages"),
            );
        }
    }
}

fn validate_telegram(config: &RelayConfig, report: &mut ValidationReport) {
    if config.bot_token().is_none() {
        report.warn(
            "telegram.botToken",
            "No Telegram bot token (set TELEGRAM_TOKEN); only the console channel can run",
        );
    }
}
