//! Single-attempt, timeout-bounded access to the completion service.

use std::sync::Arc;
use std::time::Duration;

use chatrelay_core::{DecodingParams, LlmProvider, LlmRequest, LlmResponse, RelayError};
use tracing::{debug, warn};

/// Upper bound on one completion call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Sends one system + user exchange to a provider with fixed decoding parameters.
///
/// There is no retry and no backoff: every failure is returned to the caller.
#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn LlmProvider>,
    model: String,
    params: DecodingParams,
    timeout: Duration,
}

impl CompletionGateway {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            params: DecodingParams::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_params(mut self, params: DecodingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<LlmResponse, RelayError> {
        let request = LlmRequest {
            model: self.model.clone(),
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            params: self.params,
        };
        let provider = self.provider.name().to_string();

        match tokio::time::timeout(self.timeout, self.provider.complete(&request)).await {
            Ok(Ok(response)) => {
                debug!(
                    provider = %response.provider,
                    model = %response.model,
                    tokens = response.tokens_used,
                    latency_ms = response.latency_ms,
                    "Completion received"
                );
                Ok(response)
            }
            Ok(Err(e)) => {
                warn!(provider = %provider, error = %e, "Completion failed");
                Err(RelayError::Gateway {
                    provider,
                    message: format!("{e:#}"),
                })
            }
            Err(_) => {
                warn!(provider = %provider, timeout_secs = self.timeout.as_secs(), "Completion timed out");
                Err(RelayError::Timeout {
                    provider,
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}
