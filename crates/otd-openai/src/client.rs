//! HTTP client for the OpenAI Responses and Images APIs.
//!
//! Wraps `reqwest` with bearer authentication, OpenAI error-envelope handling
//! and typed request/response bodies. Failures are never recovered locally:
//! every error is returned to the caller as-is.

use std::time::Duration;

use otd_core::{GeneratedImage, ImagePrompt};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::OpenAiError;
use crate::storage::ImageStore;
use crate::types::{
    ErrorEnvelope, ImageRequest, ImageResponse, PromptReference, PromptVariables,
    ResponsesRequest, ResponsesResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Image model used for every render.
pub const IMAGE_MODEL: &str = "dall-e-3";
/// Resolution of every render.
pub const IMAGE_SIZE: &str = "1024x1024";

/// Identity of the remotely managed prompt template used to write image prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub id: String,
    pub version: String,
}

/// Client for the two OpenAI generation calls.
///
/// Use [`OpenAiClient::new`] for production or [`OpenAiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    template: PromptTemplate,
    store: ImageStore,
}

impl OpenAiClient {
    /// Creates a new client pointed at the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        template: PromptTemplate,
        store: ImageStore,
        timeout_secs: u64,
    ) -> Result<Self, OpenAiError> {
        Self::with_base_url(api_key, template, store, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OpenAiError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        template: PromptTemplate,
        store: ImageStore,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, OpenAiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("otd/0.1 (on-this-day)")
            .build()?;

        // A single trailing slash makes `Url::join` append endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| OpenAiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            template,
            store,
        })
    }

    /// Asks the prompt template to turn `fact` into an image prompt in `style`.
    ///
    /// Only the first paragraph of `fact` (text before the first blank line)
    /// is sent. The generated text is returned verbatim.
    ///
    /// # Errors
    ///
    /// - [`OpenAiError::InvalidInput`] if the first paragraph is empty; no call is made.
    /// - [`OpenAiError::Api`] on a non-2xx response.
    /// - [`OpenAiError::Http`] on network failure.
    /// - [`OpenAiError::Deserialize`] if the response body is malformed.
    /// - [`OpenAiError::MissingOutput`] if the response contains no text.
    pub async fn generate_prompt(
        &self,
        fact: &str,
        style: &str,
    ) -> Result<ImagePrompt, OpenAiError> {
        let description = first_paragraph(fact);
        if description.trim().is_empty() {
            return Err(OpenAiError::InvalidInput(
                "fact must not be empty".to_string(),
            ));
        }

        tracing::info!(style, "generating image prompt");
        let request = ResponsesRequest {
            prompt: PromptReference {
                id: &self.template.id,
                version: &self.template.version,
                variables: PromptVariables {
                    style,
                    onthisdaydescription: description,
                },
            },
        };
        let response: ResponsesResponse = self.post_json("responses", &request).await?;

        let prompt = response.text();
        if prompt.trim().is_empty() {
            return Err(OpenAiError::MissingOutput(
                "response contained no output text".to_string(),
            ));
        }

        tracing::info!(prompt = %prompt, "image prompt generated");
        Ok(ImagePrompt {
            prompt,
            style: style.to_string(),
        })
    }

    /// Renders one [`IMAGE_SIZE`] image for `prompt` and downloads its bytes.
    ///
    /// When `persist_locally` is set, the bytes are also written to the
    /// configured [`ImageStore`].
    ///
    /// # Errors
    ///
    /// - [`OpenAiError::InvalidInput`] if `prompt` is empty; no call is made.
    /// - [`OpenAiError::Api`], [`OpenAiError::Http`], [`OpenAiError::Deserialize`]
    ///   if the generation call fails.
    /// - [`OpenAiError::MissingOutput`] if no image URL comes back or the
    ///   downloaded body is empty.
    /// - [`OpenAiError::Download`] if the image URL answers with a non-2xx status.
    /// - [`OpenAiError::Persist`] if the local copy cannot be written.
    pub async fn generate_image(
        &self,
        prompt: &str,
        persist_locally: bool,
    ) -> Result<GeneratedImage, OpenAiError> {
        if prompt.trim().is_empty() {
            return Err(OpenAiError::InvalidInput(
                "prompt must not be empty".to_string(),
            ));
        }

        tracing::info!(model = IMAGE_MODEL, size = IMAGE_SIZE, "generating image");
        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
        };
        let response: ImageResponse = self.post_json("images/generations", &request).await?;

        let image = response
            .data
            .into_iter()
            .find(|d| d.url.is_some())
            .ok_or_else(|| {
                OpenAiError::MissingOutput("image generation returned no image URL".to_string())
            })?;
        if let Some(revised) = &image.revised_prompt {
            tracing::debug!(revised_prompt = %revised, "model revised the prompt");
        }
        let url = image.url.unwrap_or_default();

        let bytes = self.download(&url).await?;
        let saved_to = if persist_locally {
            Some(self.store.save_png(&bytes).await?)
        } else {
            None
        };

        tracing::info!(bytes = bytes.len(), "image generated");
        Ok(GeneratedImage { bytes, saved_to })
    }

    /// Downloads raw bytes from a generated image URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>, OpenAiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OpenAiError::Download {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(OpenAiError::MissingOutput(format!(
                "image download from {url} returned an empty body"
            )));
        }
        Ok(bytes.to_vec())
    }

    /// Sends an authenticated JSON POST to `endpoint` and decodes the reply.
    ///
    /// Non-2xx replies become [`OpenAiError::Api`] with the message from the
    /// OpenAI error envelope, or the raw body when there is none.
    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, OpenAiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| OpenAiError::InvalidBaseUrl {
                url: format!("{}{endpoint}", self.base_url),
                reason: e.to_string(),
            })?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| OpenAiError::Deserialize {
            context: endpoint.to_string(),
            source: e,
        })
    }
}

/// Text before the first blank line (`"\n\n"`), or all of `text` if there is none.
#[must_use]
pub fn first_paragraph(text: &str) -> &str {
    text.split("\n\n").next().unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_paragraph_drops_everything_after_blank_line() {
        assert_eq!(first_paragraph("First\n\nSecond"), "First");
        assert_eq!(first_paragraph("First\n\nSecond\n\nThird"), "First");
    }

    #[test]
    fn first_paragraph_keeps_single_newlines() {
        assert_eq!(first_paragraph("Line one\nLine two"), "Line one\nLine two");
    }

    #[test]
    fn first_paragraph_of_leading_blank_line_is_empty() {
        assert_eq!(first_paragraph("\n\nSecond"), "");
    }

    #[test]
    fn base_url_without_trailing_slash_joins_endpoints() {
        let client = OpenAiClient::with_base_url(
            "sk-test",
            PromptTemplate {
                id: "pmpt_1".into(),
                version: "2".into(),
            },
            ImageStore::new("assets/images"),
            30,
            "http://127.0.0.1:9999/v1",
        )
        .expect("client construction should not fail");
        assert_eq!(
            client.base_url.join("images/generations").unwrap().as_str(),
            "http://127.0.0.1:9999/v1/images/generations"
        );
    }
}
