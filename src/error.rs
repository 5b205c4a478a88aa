use thiserror::Error;

/// Startup failures while building the upstream client.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing Guardian API key: set GUARDIAN_API_KEY or guardian.api_key")]
    MissingApiKey,

    #[error("invalid upstream base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Failures of a single upstream search.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure. The URL is stripped so the
    /// API key never ends up in logs.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid publication date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.without_url())
    }
}
