use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chatrelay_core::{LlmProvider, LlmRequest, LlmResponse};

/// A mock LLM provider that returns canned responses and remembers every request.
pub struct MockProvider {
    name: String,
    fixed_response: Option<String>,
    failure: Option<String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_response: None,
            failure: None,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `response`. Without one, the user prompt's last line is echoed.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Fail every call with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }

        let content = self.fixed_response.clone().unwrap_or_else(|| {
            let last = request.user_prompt.lines().last().unwrap_or_default();
            format!("You said: {last}")
        });

        Ok(LlmResponse {
            content,
            provider: self.name.clone(),
            model: request.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
