//! Relay Event Logger
//!
//! One structured event per pipeline milestone, emitted on the `relay_events`
//! target. Message text is redacted before it reaches any subscriber.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayEvent {
    Start,
    Inbound { text: String, window: usize },
    Reply { chars: usize },
    Fallback,
    GatewayFailure { error_msg: String },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub chat_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: RelayEvent,
}

impl EventLogEntry {
    /// Build an entry, redacting any free text the event carries.
    pub fn new(chat_id: &str, mut event: RelayEvent) -> Self {
        match &mut event {
            RelayEvent::Inbound { text, .. } => *text = redact_sensitive_data(text),
            RelayEvent::GatewayFailure { error_msg } => {
                *error_msg = redact_sensitive_data(error_msg)
            }
            RelayEvent::Start | RelayEvent::Reply { .. } | RelayEvent::Fallback => {}
        }

        Self {
            chat_id: chat_id.to_string(),
            timestamp: Utc::now(),
            event,
        }
    }

    /// One-line JSON form used as the logged `event` field.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!("{{\"serialize_error\":\"{e}\"}}"))
    }
}

pub struct EventLogger;

impl EventLogger {
    pub fn log_event(chat_id: &str, event: RelayEvent) {
        let entry = EventLogEntry::new(chat_id, event);
        let json = entry.to_json();
        match &entry.event {
            RelayEvent::Fallback => {
                error!(target: "relay_events", event = %json, "Attempted to send an empty message")
            }
            RelayEvent::GatewayFailure { .. } => {
                warn!(target: "relay_events", event = %json, "Completion gateway failed")
            }
            _ => info!(target: "relay_events", event = %json, "Relay event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_text_is_redacted() {
        let entry = EventLogEntry::new(
            "42",
            RelayEvent::Inbound {
                text: "call me at 555-123-4567".into(),
                window: 2,
            },
        );
        match entry.event {
            RelayEvent::Inbound { text, window } => {
                assert!(text.contains("[REDACTED_PHONE]"));
                assert_eq!(window, 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(entry.chat_id, "42");
    }

    #[test]
    fn gateway_error_is_redacted() {
        let entry = EventLogEntry::new(
            "42",
            RelayEvent::GatewayFailure {
                error_msg: "rejected Bearer gsk_abcdefghijklmnopqrstuvwxyz".into(),
            },
        );
        let RelayEvent::GatewayFailure { error_msg } = entry.event else {
            panic!("wrong variant");
        };
        assert!(!error_msg.contains("gsk_"));
    }

    #[test]
    fn entry_serializes_as_tagged_json() {
        let entry = EventLogEntry::new(
            "42",
            RelayEvent::Inbound {
                text: "hello".into(),
                window: 3,
            },
        );
        let value: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
        assert_eq!(value["chat_id"], "42");
        assert_eq!(value["event"]["type"], "inbound");
        assert_eq!(value["event"]["text"], "hello");
        assert_eq!(value["event"]["window"], 3);
        assert!(value["timestamp"].is_string());

        let fallback = EventLogEntry::new("42", RelayEvent::Fallback).to_json();
        assert!(fallback.contains(r#""type":"fallback""#));
    }

    #[test]
    fn logging_without_subscriber_does_not_panic() {
        EventLogger::log_event("1", RelayEvent::Start);
        EventLogger::log_event("1", RelayEvent::Fallback);
        EventLogger::log_event("1", RelayEvent::Reply { chars: 12 });
    }
}
