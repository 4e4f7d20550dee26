//! Delivers generated text to the originating chat.
//!
//! Blank completions are never forwarded; the user gets a fixed apology instead.

use chatrelay_core::{ChatId, RelayError, ReplySink};
use chatrelay_logging::{EventLogger, RelayEvent};

pub const FALLBACK_MESSAGE: &str = "Sorry, I couldn't process your request.";

/// What was sent for one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The `/start` greeting.
    Greeting,
    /// The model's text, verbatim.
    Reply(String),
    /// The apology sent in place of a blank completion.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ReplyDispatcher {
    fallback: String,
}

impl Default for ReplyDispatcher {
    fn default() -> Self {
        Self {
            fallback: FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl ReplyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `generated_text` if it has any non-whitespace content, the fallback otherwise.
    ///
    /// A failed send is returned as [`RelayError::Send`] and not retried.
    pub async fn dispatch(
        &self,
        sink: &dyn ReplySink,
        chat_id: &ChatId,
        generated_text: &str,
    ) -> Result<Delivery, RelayError> {
        if generated_text.trim().is_empty() {
            EventLogger::log_event(chat_id.as_str(), RelayEvent::Fallback);
            send(sink, chat_id, &self.fallback).await?;
            return Ok(Delivery::Fallback);
        }

        send(sink, chat_id, generated_text).await?;
        EventLogger::log_event(
            chat_id.as_str(),
            RelayEvent::Reply {
                chars: generated_text.chars().count(),
            },
        );
        Ok(Delivery::Reply(generated_text.to_string()))
    }
}

pub(crate) async fn send(sink: &dyn ReplySink, chat_id: &ChatId, text: &str) -> Result<(), RelayError> {
    sink.send_text(chat_id, text)
        .await
        .map_err(|e| RelayError::Send(format!("{e:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingSink, RecordingSink};

    #[tokio::test]
    async fn sends_text_verbatim() {
        let sink = RecordingSink::default();
        let chat = ChatId::from("42");

        let delivery = ReplyDispatcher::new()
            .dispatch(&sink, &chat, "Hello there!")
            .await
            .unwrap();

        assert_eq!(delivery, Delivery::Reply("Hello there!".into()));
        assert_eq!(sink.sent(), vec![(chat, "Hello there!".to_string())]);
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_not_trimmed_from_real_replies() {
        let sink = RecordingSink::default();
        ReplyDispatcher::new()
            .dispatch(&sink, &ChatId::from("1"), "\n hi \n")
            .await
            .unwrap();
        assert_eq!(sink.texts(), vec!["\n hi \n"]);
    }

    #[tokio::test]
    async fn blank_text_sends_fallback() {
        for blank in ["", "  ", "\n\t "] {
            let sink = RecordingSink::default();
            let delivery = ReplyDispatcher::new()
                .dispatch(&sink, &ChatId::from("42"), blank)
                .await
                .unwrap();
            assert_eq!(delivery, Delivery::Fallback);
            assert_eq!(sink.texts(), vec![FALLBACK_MESSAGE]);
        }
    }

    #[tokio::test]
    async fn send_failure_surfaces() {
        let err = ReplyDispatcher::new()
            .dispatch(&FailingSink, &ChatId::from("42"), "hi")
            .await
            .unwrap_err();
        match err {
            RelayError::Send(message) => assert!(message.contains("blocked")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
