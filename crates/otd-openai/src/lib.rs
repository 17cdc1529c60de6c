//! OpenAI client for the two generation steps of a run.
//!
//! Turns a historical fact into an image prompt through a remotely managed
//! prompt template (Responses API), then renders that prompt with the Images
//! API and downloads the resulting PNG. Generated images can optionally be
//! kept on disk as debug copies.

pub mod client;
pub mod error;
pub mod storage;
pub mod types;

pub use client::{first_paragraph, OpenAiClient, PromptTemplate, IMAGE_MODEL, IMAGE_SIZE};
pub use error::OpenAiError;
pub use storage::ImageStore;
