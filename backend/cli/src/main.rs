mod app;
mod config_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use chatrelay_channels::{ChannelAdapter, ConsoleAdapter, TelegramAdapter};
use chatrelay_config::{load_and_prepare, RelayConfig};
use chatrelay_logging::{init_logger, LogOptions};

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(about = "Relay Telegram chats to a hosted LLM, with per-chat recent history")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file (default: ~/.chatrelay/config.yaml, else environment)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot (long polling)
    Run,
    /// Chat with the relay on stdin/stdout
    Console {
        /// Chat id used for the console conversation
        #[arg(long, default_value = "console")]
        chat_id: String,
        /// Answer with the mock provider instead of calling the completion service
        #[arg(long)]
        mock: bool,
    },
    /// Print the effective configuration with secrets masked
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let env_file = app::load_env_file(None)?;
    let mut config = load_and_prepare(cli.config.as_deref()).await?;

    init_logger(&LogOptions {
        level: config.log_level().to_string(),
        dir: config.log_dir().cloned(),
        json: config.log_json(),
    });
    if let Some(path) = env_file {
        debug!(path = %path.display(), "Loaded environment from .env");
    }

    match cli.command {
        Commands::Run => {
            let token = config
                .bot_token()
                .context("Telegram bot token is not set (TELEGRAM_TOKEN)")?
                .to_string();
            let adapter = TelegramAdapter::new(token);
            serve(&config, &adapter).await?;
        }
        Commands::Console { chat_id, mock } => {
            if mock {
                app::use_mock_provider(&mut config);
            }
            let adapter = ConsoleAdapter::new(chat_id);
            serve(&config, &adapter).await?;
        }
        Commands::Config => config_cmd::run(&config)?,
    }

    Ok(())
}

async fn serve(config: &RelayConfig, adapter: &dyn ChannelAdapter) -> Result<()> {
    app::check_config(config)?;
    let relay = Arc::new(app::build_relay(config)?);

    info!(
        channel = adapter.name(),
        model = %config.model(),
        window_size = relay.window_size(),
        "Starting chatrelay"
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            info!("Signal received, stopping the bot");
            shutdown.cancel();
        }
    });

    adapter.run(relay, shutdown).await
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
