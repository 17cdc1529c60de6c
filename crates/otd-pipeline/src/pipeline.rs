//! The four-stage run: fact, prompt, image, post.

use std::fmt;
use std::sync::Arc;

use otd_core::{AppConfig, PublishResult};
use otd_history::HistoryClient;
use otd_openai::{ImageStore, OpenAiClient, PromptTemplate};
use otd_twitter::{OAuthCredentials, TwitterClient};

use crate::error::PipelineError;
use crate::stages::{FactSource, ImageSource, PostPublisher, PromptSource};

/// Style passed to the prompt template when none is configured.
pub const DEFAULT_STYLE: &str = "cinematic";

/// Position of a run in the stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchFact,
    GeneratePrompt,
    GenerateImage,
    Publish,
    Done,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FetchFact => "fetch_fact",
            Self::GeneratePrompt => "generate_prompt",
            Self::GenerateImage => "generate_image",
            Self::Publish => "publish",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sequences the stages of one run. Each stage is awaited before the next
/// starts and the first failure ends the run.
pub struct Pipeline {
    facts: Arc<dyn FactSource>,
    prompts: Arc<dyn PromptSource>,
    images: Arc<dyn ImageSource>,
    publisher: Arc<dyn PostPublisher>,
    style: String,
    persist_locally: bool,
}

impl Pipeline {
    /// Builds a pipeline over the given stages, using [`DEFAULT_STYLE`] and
    /// no local image copies.
    #[must_use]
    pub fn new(
        facts: Arc<dyn FactSource>,
        prompts: Arc<dyn PromptSource>,
        images: Arc<dyn ImageSource>,
        publisher: Arc<dyn PostPublisher>,
    ) -> Self {
        Self {
            facts,
            prompts,
            images,
            publisher,
            style: DEFAULT_STYLE.to_string(),
            persist_locally: false,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    #[must_use]
    pub fn with_persist_locally(mut self, persist_locally: bool) -> Self {
        self.persist_locally = persist_locally;
        self
    }

    /// Wires the production clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Setup`] if any HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let timeout = config.http_timeout_secs;

        let history = HistoryClient::new(timeout).map_err(|e| PipelineError::Setup {
            component: "history",
            reason: e.to_string(),
        })?;

        let template = PromptTemplate {
            id: config.openai_prompt_id.clone(),
            version: config.openai_prompt_version.clone(),
        };
        let openai = OpenAiClient::new(
            &config.openai_api_key,
            template,
            ImageStore::new(config.image_dir.clone()),
            timeout,
        )
        .map_err(|e| PipelineError::Setup {
            component: "openai",
            reason: e.to_string(),
        })?;
        let openai = Arc::new(openai);
        let prompts: Arc<dyn PromptSource> = openai.clone();

        let credentials = OAuthCredentials {
            consumer_key: config.twitter_api_key.clone(),
            consumer_secret: config.twitter_api_secret.clone(),
            access_token: config.twitter_access_token.clone(),
            access_token_secret: config.twitter_access_secret.clone(),
        };
        let twitter = TwitterClient::new(credentials, timeout).map_err(|e| PipelineError::Setup {
            component: "twitter",
            reason: e.to_string(),
        })?;

        Ok(Self::new(
            Arc::new(history),
            prompts,
            openai,
            Arc::new(twitter),
        )
        .with_style(config.image_style.clone())
        .with_persist_locally(config.save_local))
    }

    #[must_use]
    pub fn style(&self) -> &str {
        &self.style
    }

    #[must_use]
    pub fn persists_locally(&self) -> bool {
        self.persist_locally
    }

    /// Runs every stage once and returns the created post.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::NoFact`] if no fact is available; nothing else runs.
    /// - [`PipelineError::Prompt`], [`PipelineError::Image`] or
    ///   [`PipelineError::Publish`] carrying the first stage failure unchanged.
    pub async fn run(&self) -> Result<PublishResult, PipelineError> {
        match self.run_stages().await {
            Ok(result) => {
                tracing::info!(stage = %Stage::Done, post_id = %result.id, "pipeline run complete");
                Ok(result)
            }
            Err(e) => {
                let stage = e.stage().map_or("setup", Stage::as_str);
                tracing::error!(stage, error = %e, "pipeline run failed");
                Err(e)
            }
        }
    }

    async fn run_stages(&self) -> Result<PublishResult, PipelineError> {
        tracing::info!(stage = %Stage::FetchFact, "pipeline stage");
        let fact = self
            .facts
            .fetch_fact()
            .await
            .ok_or(PipelineError::NoFact)?;

        tracing::info!(stage = %Stage::GeneratePrompt, "pipeline stage");
        let prompt = self
            .prompts
            .generate_prompt(fact.as_str(), &self.style)
            .await
            .map_err(PipelineError::Prompt)?;

        tracing::info!(stage = %Stage::GenerateImage, "pipeline stage");
        let image = self
            .images
            .generate_image(&prompt.prompt, self.persist_locally)
            .await
            .map_err(PipelineError::Image)?;
        if let Some(path) = &image.saved_to {
            tracing::info!(path = %path.display(), "image saved locally");
        }

        tracing::info!(stage = %Stage::Publish, "pipeline stage");
        self.publisher
            .publish(&image.bytes, fact.as_str())
            .await
            .map_err(PipelineError::Publish)
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
