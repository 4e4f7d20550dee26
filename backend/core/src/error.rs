use thiserror::Error;

/// Top-level error type for the relay pipeline.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("completion provider error ({provider}): {message}")]
    Gateway { provider: String, message: String },

    #[error("completion provider {provider} timed out after {secs}s")]
    Timeout { provider: String, secs: u64 },

    #[error("failed to send reply: {0}")]
    Send(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RelayError {
    /// True for failures raised by the completion service call.
    pub fn is_gateway_failure(&self) -> bool {
        matches!(self, Self::Gateway { .. } | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_are_classified() {
        let err = RelayError::Gateway {
            provider: "groq".into(),
            message: "401 Unauthorized".into(),
        };
        assert!(err.is_gateway_failure());
        assert_eq!(
            err.to_string(),
            "completion provider error (groq): 401 Unauthorized"
        );

        let timeout = RelayError::Timeout { provider: "groq".into(), secs: 60 };
        assert!(timeout.is_gateway_failure());

        assert!(!RelayError::Send("chat not found".into()).is_gateway_failure());
    }
}
