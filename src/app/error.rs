use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No 'weibo' container found for user {0}")]
    ContainerNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl HarvestError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Decode failures and missing containers are deterministic for a given
    /// response, so only transport-level failures qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            HarvestError::Transport(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                e.status().is_some_and(|s| s.is_server_error())
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
