//! HTTP client for posting an image with text.
//!
//! Publishing is two calls: a v1.1 media upload that returns a media id, then
//! a v2 post creation that references it. Both are OAuth 1.0a user-context
//! requests.

use std::time::Duration;

use otd_core::{PublishResult, IMAGE_MIME_TYPE, MAX_POST_CHARS};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::TwitterError;
use crate::oauth::{authorization_header, OAuthCredentials};
use crate::types::{
    CreateTweetRequest, CreateTweetResponse, ErrorBody, MediaUploadResponse, TweetMedia,
};

const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/";
const DEFAULT_UPLOAD_BASE_URL: &str = "https://upload.twitter.com/";

const MEDIA_UPLOAD_PATH: &str = "1.1/media/upload.json";
const CREATE_TWEET_PATH: &str = "2/tweets";

/// Client for the media upload and post creation endpoints.
///
/// Use [`TwitterClient::new`] for production or
/// [`TwitterClient::with_base_urls`] to point at a mock server in tests.
pub struct TwitterClient {
    client: Client,
    credentials: OAuthCredentials,
    api_base: Url,
    upload_base: Url,
}

impl TwitterClient {
    /// Creates a new client pointed at the production API hosts.
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(credentials: OAuthCredentials, timeout_secs: u64) -> Result<Self, TwitterError> {
        Self::with_base_urls(
            credentials,
            timeout_secs,
            DEFAULT_API_BASE_URL,
            DEFAULT_UPLOAD_BASE_URL,
        )
    }

    /// Creates a new client with custom API and upload hosts (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TwitterError::InvalidBaseUrl`] if either
    /// base URL is not a valid URL.
    pub fn with_base_urls(
        credentials: OAuthCredentials,
        timeout_secs: u64,
        api_base_url: &str,
        upload_base_url: &str,
    ) -> Result<Self, TwitterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("otd/0.1 (on-this-day)")
            .build()?;

        Ok(Self {
            client,
            credentials,
            api_base: parse_base_url(api_base_url)?,
            upload_base: parse_base_url(upload_base_url)?,
        })
    }

    /// Uploads `image` as a PNG and posts it with `text`.
    ///
    /// Calls the upload endpoint exactly once, then the post endpoint exactly
    /// once, and returns the created post. Any failure is logged once here and
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`TwitterError::InvalidInput`] if `image` is empty or `text` is longer
    ///   than [`MAX_POST_CHARS`]; nothing is sent.
    /// - [`TwitterError::Api`] on a non-2xx response from either step.
    /// - [`TwitterError::Http`] on network failure.
    /// - [`TwitterError::Deserialize`] if a response body is malformed.
    pub async fn publish(&self, image: &[u8], text: &str) -> Result<PublishResult, TwitterError> {
        match self.upload_and_post(image, text).await {
            Ok(result) => {
                tracing::info!(post_id = %result.id, "post published");
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to publish post");
                Err(e)
            }
        }
    }

    async fn upload_and_post(
        &self,
        image: &[u8],
        text: &str,
    ) -> Result<PublishResult, TwitterError> {
        if image.is_empty() {
            return Err(TwitterError::InvalidInput(
                "image must not be empty".to_string(),
            ));
        }
        let chars = text.chars().count();
        if chars > MAX_POST_CHARS {
            return Err(TwitterError::InvalidInput(format!(
                "post text is {chars} characters, limit is {MAX_POST_CHARS}"
            )));
        }

        let media_id = self.upload_media(image).await?;
        tracing::debug!(media_id = %media_id, "media uploaded");
        self.create_post(text, &media_id).await
    }

    /// Uploads PNG bytes and returns the media id.
    async fn upload_media(&self, image: &[u8]) -> Result<String, TwitterError> {
        let url = join(&self.upload_base, MEDIA_UPLOAD_PATH)?;
        let auth = authorization_header(&self.credentials, "POST", &url, &[])?;

        let part = Part::bytes(image.to_vec())
            .file_name("image.png")
            .mime_str(IMAGE_MIME_TYPE)?;
        let form = Form::new().part("media", part);

        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await?;

        let upload: MediaUploadResponse = read_json(response, "media upload").await?;
        Ok(upload.media_id_string)
    }

    async fn create_post(&self, text: &str, media_id: &str) -> Result<PublishResult, TwitterError> {
        let url = join(&self.api_base, CREATE_TWEET_PATH)?;
        let auth = authorization_header(&self.credentials, "POST", &url, &[])?;
        let request = CreateTweetRequest {
            text,
            media: TweetMedia {
                media_ids: vec![media_id],
            },
        };

        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&request)
            .send()
            .await?;

        let created: CreateTweetResponse = read_json(response, "post creation").await?;
        Ok(PublishResult {
            id: created.data.id,
            text: created.data.text,
        })
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, TwitterError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| TwitterError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, TwitterError> {
    base.join(path).map_err(|e| TwitterError::InvalidBaseUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })
}

/// Checks the status and decodes the body. Non-2xx replies become
/// [`TwitterError::Api`] with the platform's message, or the raw body.
async fn read_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, TwitterError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.message())
            .unwrap_or(body);
        return Err(TwitterError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| TwitterError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
