use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotionError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Notion answered with a non-success status
    #[error("Notion API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("failed to decode Notion response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NotionError {
    /// Whether a caller could reasonably retry the request later.
    pub fn is_transient(&self) -> bool {
        match self {
            NotionError::Http(_) => true,
            NotionError::Api { status, .. } => *status == 429 || *status >= 500,
            NotionError::Decode(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotionError>;
