use std::time::Duration;

/// Failure below the HTTP layer: DNS, TLS, connect, timeout
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Reqwest(e) => e.is_timeout(),
            Self::Other(_) => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("{provider} API key is not set")]
    MissingCredential { provider: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{provider} network error: {source}")]
    Transport {
        provider: String,
        #[source]
        source: TransportError,
    },

    #[error("{provider} API error ({status}): {body}")]
    HttpStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an unparseable response: {detail}")]
    UnparseableResponse { provider: String, detail: String },

    #[error("Translation cancelled")]
    Cancelled,
}

impl TranslateError {
    pub fn unparseable(provider: &str, detail: impl Into<String>) -> Self {
        Self::UnparseableResponse {
            provider: provider.to_string(),
            detail: detail.into(),
        }
    }

    pub fn transport(provider: &str, source: TransportError) -> Self {
        Self::Transport {
            provider: provider.to_string(),
            source,
        }
    }

    /// HTTP status for `HttpStatus` failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
