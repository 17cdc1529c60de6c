//! Local debug copies of generated images.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::OpenAiError;

/// Writes PNGs under a fixed directory, one freshly named file per image.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` to `<dir>/<uuid>.png`, creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError::Persist`] if the directory cannot be created or
    /// the file cannot be written.
    pub async fn save_png(&self, bytes: &[u8]) -> Result<PathBuf, OpenAiError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| OpenAiError::Persist {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.dir.join(format!("{}.png", Uuid::new_v4()));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| OpenAiError::Persist {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved image locally");
        Ok(path)
    }
}
