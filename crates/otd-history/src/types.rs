//! Events API response types.
//!
//! The API answers `GET /date` with `{"date": ..., "data": {"Events": [...]}}`.

use serde::{Deserialize, Deserializer};

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    pub data: EventsData,
}

#[derive(Debug, Deserialize)]
pub struct EventsData {
    #[serde(rename = "Events", default)]
    pub events: Vec<HistoryEvent>,
}

/// A single dated event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEvent {
    /// The API sends years as strings (`"1776"`, `"44 BC"`); numbers are accepted too.
    #[serde(default, deserialize_with = "year_from_value")]
    pub year: Option<String>,
    /// Anything other than a string leaves the event without text, so a
    /// single malformed entry is skipped instead of failing the whole day.
    #[serde(default, deserialize_with = "text_from_value")]
    pub text: Option<String>,
}

impl HistoryEvent {
    /// Events with no text have nothing to post.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

fn year_from_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn text_from_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_numeric_years() {
        let body = serde_json::json!({
            "date": "July 4",
            "data": {
                "Events": [
                    { "year": "1776", "text": "Declaration of Independence was signed" },
                    { "year": 1492, "text": "Numeric year" },
                    { "year": null, "text": "Null year" },
                    { "text": "Missing year" }
                ]
            }
        });
        let parsed: EventsResponse = serde_json::from_value(body).unwrap();
        let years: Vec<Option<&str>> = parsed
            .data
            .events
            .iter()
            .map(|e| e.year.as_deref())
            .collect();
        assert_eq!(years, vec![Some("1776"), Some("1492"), None, None]);
    }

    #[test]
    fn mistyped_text_only_drops_that_event() {
        let body = serde_json::json!({
            "data": {
                "Events": [
                    { "year": "1776", "text": 123 },
                    { "year": "1492", "text": ["not", "text"] },
                    { "year": "1969", "text": "Apollo 11 launched" }
                ]
            }
        });
        let parsed: EventsResponse = serde_json::from_value(body).unwrap();
        let usable: Vec<&HistoryEvent> =
            parsed.data.events.iter().filter(|e| e.is_usable()).collect();
        assert_eq!(usable.len(), 1);
        assert_eq!(usable[0].text.as_deref(), Some("Apollo 11 launched"));
    }

    #[test]
    fn missing_events_key_defaults_to_empty() {
        let parsed: EventsResponse =
            serde_json::from_value(serde_json::json!({ "data": {} })).unwrap();
        assert!(parsed.data.events.is_empty());
    }

    #[test]
    fn missing_data_is_an_error() {
        let result = serde_json::from_value::<EventsResponse>(serde_json::json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn blank_text_is_not_usable() {
        let event = HistoryEvent {
            year: Some("1492".into()),
            text: Some("   ".into()),
        };
        assert!(!event.is_usable());
        let event = HistoryEvent {
            year: Some("1492".into()),
            text: None,
        };
        assert!(!event.is_usable());
    }
}
