use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer from the OpenAI API, carrying the API's own message when it sent one.
    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("image download failed with status {status} from {url}")]
    Download { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing output: {0}")]
    MissingOutput(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to save image to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
