//! The per-message relay pipeline.
//!
//! History append -> prompt composition -> completion -> delivery, strictly in
//! that order. The message is recorded before the completion call, so a
//! failed call still leaves it in the chat's history.

use chatrelay_core::{ChatId, InboundEvent, RelayError, ReplySink};
use chatrelay_logging::{EventLogger, RelayEvent};
use chatrelay_memory::{HistoryStore, DEFAULT_WINDOW_SIZE};
use chatrelay_providers::CompletionGateway;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::reply_dispatcher::{send, Delivery, ReplyDispatcher};
use crate::system_prompt::{PromptComposer, PromptMode};

pub const GREETING: &str = "Hi I'm a bot, how can I help?";

pub struct ChatRelay {
    history: HistoryStore,
    composer: PromptComposer,
    gateway: CompletionGateway,
    dispatcher: ReplyDispatcher,
    mode: PromptMode,
    window_size: usize,
}

impl ChatRelay {
    pub fn new(history: HistoryStore, gateway: CompletionGateway) -> Self {
        Self {
            history,
            composer: PromptComposer::default(),
            gateway,
            dispatcher: ReplyDispatcher::default(),
            mode: PromptMode::default(),
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    pub fn with_mode(mut self, mode: PromptMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub async fn handle_event(
        &self,
        sink: &dyn ReplySink,
        event: &InboundEvent,
    ) -> Result<Delivery, RelayError> {
        match event {
            InboundEvent::Start { chat_id } => self.handle_start(sink, chat_id).await,
            InboundEvent::Text { chat_id, text } => self.handle_message(sink, chat_id, text).await,
        }
    }

    /// Reply with the fixed greeting. History is not touched.
    pub async fn handle_start(
        &self,
        sink: &dyn ReplySink,
        chat_id: &ChatId,
    ) -> Result<Delivery, RelayError> {
        EventLogger::log_event(chat_id.as_str(), RelayEvent::Start);
        send(sink, chat_id, GREETING).await?;
        Ok(Delivery::Greeting)
    }

    /// Run the full pipeline for one text message.
    ///
    /// Gateway failures are returned without sending anything to the chat.
    #[instrument(skip_all, fields(chat_id = %chat_id, trace_id = %Uuid::new_v4()))]
    pub async fn handle_message(
        &self,
        sink: &dyn ReplySink,
        chat_id: &ChatId,
        text: &str,
    ) -> Result<Delivery, RelayError> {
        let window = self
            .history
            .record_and_window(chat_id, text, self.window_size);

        EventLogger::log_event(
            chat_id.as_str(),
            RelayEvent::Inbound {
                text: text.to_string(),
                window: window.len(),
            },
        );

        let prompt = self.composer.compose(text, &window, self.mode);

        let response = match self
            .gateway
            .complete(&prompt.system_prompt, &prompt.user_prompt)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                EventLogger::log_event(
                    chat_id.as_str(),
                    RelayEvent::GatewayFailure {
                        error_msg: e.to_string(),
                    },
                );
                return Err(e);
            }
        };

        let delivery = self
            .dispatcher
            .dispatch(sink, chat_id, &response.content)
            .await?;

        info!(
            provider = %response.provider,
            latency_ms = response.latency_ms,
            "Handled message"
        );
        Ok(delivery)
    }
}
