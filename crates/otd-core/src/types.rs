use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// MIME type of every generated image.
pub const IMAGE_MIME_TYPE: &str = "image/png";

/// Text used to drive image synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt {
    pub prompt: String,
    /// Style tag the prompt was generated with, e.g. `cinematic`.
    pub style: String,
}

/// Raw PNG bytes returned by the image generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    /// Where the debug copy was written, if local saving was enabled.
    pub saved_to: Option<PathBuf>,
}

/// Confirmation of a successful post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub id: String,
    pub text: String,
}
