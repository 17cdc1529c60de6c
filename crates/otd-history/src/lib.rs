//! Client for the "on this day" historical events API.
//!
//! Fetches today's events, picks one uniformly at random and formats it as
//! postable text. Fetch failures never escape this crate as errors: they are
//! logged and reported as "no fact available".

pub mod client;
pub mod error;
pub mod select;
pub mod types;

pub use client::HistoryClient;
pub use error::HistoryError;
pub use select::{select_fact, select_fact_with};
pub use types::{EventsData, EventsResponse, HistoryEvent};
