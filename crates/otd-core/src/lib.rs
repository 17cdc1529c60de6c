//! Shared configuration and data model for the on-this-day image poster.

pub mod app_config;
pub mod config;
pub mod fact;
pub mod types;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use fact::{format_fact, HistoricalFact, MAX_POST_CHARS};
pub use types::{GeneratedImage, ImagePrompt, PublishResult, IMAGE_MIME_TYPE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
