//! Publisher for Twitter/X: uploads an image, then posts it with text.

pub mod client;
pub mod error;
pub mod oauth;
pub mod types;

pub use client::TwitterClient;
pub use error::TwitterError;
pub use oauth::OAuthCredentials;
