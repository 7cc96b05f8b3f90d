use thiserror::Error;

/// Application-wide error types for lede.
#[derive(Error, Debug)]
pub enum AppError {
    /// The requested URL is missing, relative, or not http/https.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed (fetching a page).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A single extraction strategy failed on an otherwise valid document.
    #[error("Extractor error: {0}")]
    ExtractorError(String),

    /// Every extraction strategy came up empty for this page.
    #[error("All extraction strategies failed for {url}")]
    ExtractionFailed { url: String },

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Bad or missing configuration.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::NetworkError(_) | AppError::Timeout(_) | AppError::RateLimitExceeded => true,
            AppError::HttpError(msg) => {
                msg.contains("timeout")
                    || msg.contains("connect")
                    || msg.contains("reset")
                    || msg.contains("HTTP 429")
                    || msg.contains("HTTP 5")
            }
            _ => false,
        }
    }
}
