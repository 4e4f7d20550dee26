use std::sync::Arc;

use async_trait::async_trait;
use chatrelay_agent::ChatRelay;
use tokio_util::sync::CancellationToken;

pub mod console;
pub mod telegram;
pub mod telegram_commands;

pub use console::{ConsoleAdapter, ConsoleSink};
pub use telegram::{TelegramAdapter, TelegramSink};

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Deliver inbound events to `relay` until `shutdown` is cancelled or the
    /// source is exhausted.
    async fn run(&self, relay: Arc<ChatRelay>, shutdown: CancellationToken) -> anyhow::Result<()>;
}
