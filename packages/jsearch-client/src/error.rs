use thiserror::Error;

#[derive(Debug, Error)]
pub enum JSearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSearch API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("unparseable JSearch response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JSearchError>;
