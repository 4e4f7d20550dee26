//! Structured Logger
//!
//! Wraps `tracing` with a console layer, an optional daily-rolling JSON file
//! layer, and `RUST_LOG`-overridable level control.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logger settings, usually taken from the `logging` config section.
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub level: String,
    /// Directory for `chatrelay.log.YYYY-MM-DD` files. No file output when unset.
    pub dir: Option<PathBuf>,
    /// Emit console output as JSON instead of human-readable lines.
    pub json: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
        }
    }
}

/// Initialize the global subscriber. Later calls are no-ops.
///
/// Console output goes to stderr so stdout stays free for the console channel.
pub fn init_logger(options: &LogOptions) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));

    let file_layer = options.dir.as_ref().map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "chatrelay.log");
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let json_console = options
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));

    let text_console = (!options.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_console)
        .with(text_console)
        .with(file_layer)
        .try_init();
}
