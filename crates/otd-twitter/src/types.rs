//! Request and response bodies for media upload and post creation.

use serde::{Deserialize, Serialize};

/// `POST media/upload.json` response. Only the string form of the id is used,
/// the numeric one overflows JSON number precision in some clients.
#[derive(Debug, Deserialize)]
pub struct MediaUploadResponse {
    pub media_id_string: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTweetRequest<'a> {
    pub text: &'a str,
    pub media: TweetMedia<'a>,
}

#[derive(Debug, Serialize)]
pub struct TweetMedia<'a> {
    pub media_ids: Vec<&'a str>,
}

/// `POST /2/tweets` response: `{"data": {"id": "...", "text": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct CreateTweetResponse {
    pub data: TweetData,
}

#[derive(Debug, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,
}

/// Error bodies come in two shapes: v2 problem details (`detail`/`title`) and
/// v1.1 `{"errors": [{"message": ...}]}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorItem {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.detail
            .clone()
            .or_else(|| self.errors.iter().find_map(|e| e.message.clone()))
            .or_else(|| self.title.clone())
    }
}
