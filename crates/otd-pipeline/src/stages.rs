//! Narrow seams between the controller and the clients it drives.
//!
//! Each trait covers exactly one pipeline stage, so a run can be exercised
//! with substitutes for any of the external services.

use async_trait::async_trait;
use otd_core::{GeneratedImage, HistoricalFact, ImagePrompt, PublishResult};
use otd_history::HistoryClient;
use otd_openai::{OpenAiClient, OpenAiError};
use otd_twitter::{TwitterClient, TwitterError};

/// Supplies today's fact. Absence is a value, not an error.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self) -> Option<HistoricalFact>;
}

#[async_trait]
pub trait PromptSource: Send + Sync {
    async fn generate_prompt(&self, fact: &str, style: &str) -> Result<ImagePrompt, OpenAiError>;
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn generate_image(
        &self,
        prompt: &str,
        persist_locally: bool,
    ) -> Result<GeneratedImage, OpenAiError>;
}

#[async_trait]
pub trait PostPublisher: Send + Sync {
    async fn publish(&self, image: &[u8], text: &str) -> Result<PublishResult, TwitterError>;
}

#[async_trait]
impl FactSource for HistoryClient {
    async fn fetch_fact(&self) -> Option<HistoricalFact> {
        HistoryClient::fetch_fact(self).await
    }
}

#[async_trait]
impl PromptSource for OpenAiClient {
    async fn generate_prompt(&self, fact: &str, style: &str) -> Result<ImagePrompt, OpenAiError> {
        OpenAiClient::generate_prompt(self, fact, style).await
    }
}

#[async_trait]
impl ImageSource for OpenAiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        persist_locally: bool,
    ) -> Result<GeneratedImage, OpenAiError> {
        OpenAiClient::generate_image(self, prompt, persist_locally).await
    }
}

#[async_trait]
impl PostPublisher for TwitterClient {
    async fn publish(&self, image: &[u8], text: &str) -> Result<PublishResult, TwitterError> {
        TwitterClient::publish(self, image, text).await
    }
}
