use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_prompt_id: String,
    pub openai_prompt_version: String,
    pub twitter_api_key: String,
    pub twitter_api_secret: String,
    pub twitter_access_token: String,
    pub twitter_access_secret: String,
    /// Write every generated image under `image_dir` as a debug copy.
    pub save_local: bool,
    pub image_dir: PathBuf,
    pub image_style: String,
    pub log_level: String,
    pub http_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"[redacted]")
            .field("openai_prompt_id", &self.openai_prompt_id)
            .field("openai_prompt_version", &self.openai_prompt_version)
            .field("twitter_api_key", &"[redacted]")
            .field("twitter_api_secret", &"[redacted]")
            .field("twitter_access_token", &"[redacted]")
            .field("twitter_access_secret", &"[redacted]")
            .field("save_local", &self.save_local)
            .field("image_dir", &self.image_dir)
            .field("image_style", &self.image_style)
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}
