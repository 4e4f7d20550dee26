use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chatrelay_agent::ChatRelay;
use chatrelay_core::{ChatId, ReplySink};
use teloxide::dispatching::{Dispatcher, ShutdownToken, UpdateFilterExt};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::requests::Requester;
use teloxide::types::{ChatId as TelegramChatId, Me, Message, Update};
use teloxide::update_listeners::polling_default;
use teloxide::{dptree, respond, Bot, RequestError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::telegram_commands::{inbound_event, split_message, MAX_MESSAGE_LEN};
use crate::ChannelAdapter;

/// How often a pending shutdown is retried while the dispatcher is still starting.
const SHUTDOWN_RETRY: Duration = Duration::from_millis(50);

/// Long-polling Telegram channel.
///
/// teloxide's dispatcher handles updates from one chat strictly in order, so a
/// chat never has two messages in the relay at once.
pub struct TelegramAdapter {
    bot: Bot,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Talk to a Bot API server other than api.telegram.org.
    pub fn with_api_url(mut self, url: Url) -> Self {
        self.bot = self.bot.set_api_url(url);
        self
    }
}

#[async_trait]
impl ChannelAdapter for TelegramAdapter {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn run(&self, relay: Arc<ChatRelay>, shutdown: CancellationToken) -> anyhow::Result<()> {
        info!("Starting Telegram adapter");

        // Dropping a webhook and checking its state both hit the network; stay
        // responsive to shutdown while they run.
        let listener = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                info!("Shutdown requested before Telegram polling started");
                return Ok(());
            }
            listener = polling_default(self.bot.clone()) => listener,
        };

        let handler = Update::filter_message().endpoint(on_message);

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![relay])
            .default_handler(|update| async move {
                debug!(update = ?update, "Ignoring unsupported update");
            })
            .build();

        let watcher = tokio::spawn(stop_when_cancelled(
            dispatcher.shutdown_token(),
            shutdown.clone(),
        ));

        let result = dispatcher
            .try_dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("Telegram update listener error"),
            )
            .await;
        watcher.abort();

        result.context("Telegram rejected the bot token or is unreachable (getMe failed)")?;
        info!("Telegram adapter stopped");
        Ok(())
    }
}

/// Ask the dispatcher to stop once `shutdown` fires.
///
/// The dispatcher refuses shutdown until it is running, so keep asking.
async fn stop_when_cancelled(stop: ShutdownToken, shutdown: CancellationToken) {
    shutdown.cancelled().await;
    info!("Stopping Telegram polling");
    loop {
        match stop.shutdown() {
            Ok(drained) => {
                drained.await;
                return;
            }
            Err(_) => {
                debug!("Telegram dispatcher not running yet; retrying shutdown");
                tokio::time::sleep(SHUTDOWN_RETRY).await;
            }
        }
    }
}

async fn on_message(
    bot: Bot,
    me: Me,
    msg: Message,
    relay: Arc<ChatRelay>,
) -> Result<(), RequestError> {
    let Some(event) = inbound_event(msg.chat.id.0, msg.text(), me.user.username.as_deref())
    else {
        debug!(chat_id = msg.chat.id.0, "Ignoring message without text");
        return respond(());
    };

    let sink = TelegramSink::new(bot);
    if let Err(e) = relay.handle_event(&sink, &event).await {
        error!(chat_id = %event.chat_id(), error = %e, "Failed to handle Telegram message");
    }
    respond(())
}

/// Sends replies through the Bot API.
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> anyhow::Result<()> {
        let chat_id: i64 = chat_id.as_str().parse()?;
        let parts = split_message(text, MAX_MESSAGE_LEN);
        if parts.len() > 1 {
            warn!(chat_id, parts = parts.len(), "Reply exceeds Telegram limit; splitting");
        }
        for part in parts {
            self.bot.send_message(TelegramChatId(chat_id), part).await?;
        }
        Ok(())
    }
}
