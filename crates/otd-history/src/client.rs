//! HTTP client for the muffinlabs "history on this day" API.
//!
//! The server infers today's date, so the request carries no parameters.

use std::time::Duration;

use otd_core::HistoricalFact;
use reqwest::{Client, Url};

use crate::error::HistoryError;
use crate::select::select_fact;
use crate::types::{EventsResponse, HistoryEvent};

const DEFAULT_BASE_URL: &str = "https://history.muffinlabs.com/";

/// Client for the historical events API.
///
/// Use [`HistoryClient::new`] for production or [`HistoryClient::with_base_url`]
/// to point at a mock server in tests.
pub struct HistoryClient {
    client: Client,
    url: Url,
}

impl HistoryClient {
    /// Creates a new client pointed at the production events API.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, HistoryError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`HistoryError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, HistoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("otd/0.1 (on-this-day)")
            .build()?;

        let normalised = format!("{}/date", base_url.trim_end_matches('/'));
        let url = Url::parse(&normalised).map_err(|e| HistoryError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, url })
    }

    /// The endpoint this client reads events from.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches today's events and returns one of them, chosen at random, as a
    /// postable fact.
    ///
    /// Never fails: a network or parse error, or an empty event list, is
    /// logged and reported as `None`.
    pub async fn fetch_fact(&self) -> Option<HistoricalFact> {
        let events = match self.fetch_events().await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "failed to fetch historical events");
                return None;
            }
        };

        let total = events.len();
        let Some(fact) = select_fact(events) else {
            tracing::warn!(url = %self.url, total, "no usable historical events for today");
            return None;
        };

        tracing::info!(fact = %fact, "selected today's fact");
        Some(fact)
    }

    /// Fetches the raw event list for today.
    ///
    /// # Errors
    ///
    /// - [`HistoryError::Http`] on network failure.
    /// - [`HistoryError::UnexpectedStatus`] on a non-2xx response.
    /// - [`HistoryError::Deserialize`] if the body does not match
    ///   `{ data: { Events: [...] } }`.
    pub async fn fetch_events(&self) -> Result<Vec<HistoryEvent>, HistoryError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HistoryError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: EventsResponse =
            serde_json::from_str(&body).map_err(|e| HistoryError::Deserialize {
                context: self.url.to_string(),
                source: e,
            })?;

        Ok(parsed.data.events)
    }
}
