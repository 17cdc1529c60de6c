//! Postable "on this day" facts.

use serde::Serialize;

/// Maximum length of a post, counted in characters.
pub const MAX_POST_CHARS: usize = 280;

const ELLIPSIS: &str = "...";

/// One historical event, formatted as the text of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalFact {
    pub year: Option<String>,
    pub text: String,
    post_text: String,
}

impl HistoricalFact {
    /// Builds a fact and its capped post text.
    #[must_use]
    pub fn new(year: Option<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let post_text = format_fact(year.as_deref(), &text);
        Self {
            year,
            text,
            post_text,
        }
    }

    /// The `"{year}: {text}"` form, at most [`MAX_POST_CHARS`] characters long.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.post_text
    }
}

impl std::fmt::Display for HistoricalFact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.post_text)
    }
}

/// Formats an event as `"{year}: {text}"` and caps it at [`MAX_POST_CHARS`].
///
/// Events without a year render as the bare text. Anything longer than the cap
/// keeps its first 277 characters followed by `"..."`, so the result is exactly
/// 280 characters.
#[must_use]
pub fn format_fact(year: Option<&str>, text: &str) -> String {
    let combined = match year {
        Some(year) => format!("{year}: {text}"),
        None => text.to_string(),
    };
    truncate_chars(combined, MAX_POST_CHARS)
}

fn truncate_chars(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        return s;
    }
    let keep = max - ELLIPSIS.len();
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
