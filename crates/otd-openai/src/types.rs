//! OpenAI request and response bodies.
//!
//! Only the fields this crate reads are modelled; everything else in the
//! responses is ignored.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// POST /responses
// ---------------------------------------------------------------------------

/// A Responses API call that references a stored prompt template.
#[derive(Debug, Serialize)]
pub struct ResponsesRequest<'a> {
    pub prompt: PromptReference<'a>,
}

#[derive(Debug, Serialize)]
pub struct PromptReference<'a> {
    pub id: &'a str,
    pub version: &'a str,
    pub variables: PromptVariables<'a>,
}

/// Template variables. The names must match the stored template.
#[derive(Debug, Serialize)]
pub struct PromptVariables<'a> {
    pub style: &'a str,
    pub onthisdaydescription: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesResponse {
    /// Convenience field some gateways add; the raw API only sends `output`.
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponsesResponse {
    /// All generated text: every `output_text` part of every `message` item, in order.
    #[must_use]
    pub fn text(&self) -> String {
        if let Some(text) = &self.output_text {
            return text.clone();
        }
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// POST /images/generations
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ImageRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub n: u8,
    pub size: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// `{"error": {"message": "..."}}` body sent with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_message_output_parts() {
        let body: ResponsesResponse = serde_json::from_value(serde_json::json!({
            "id": "resp_1",
            "object": "response",
            "output": [
                { "type": "reasoning", "summary": [] },
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        { "type": "output_text", "text": "A cinematic ", "annotations": [] },
                        { "type": "refusal", "refusal": "no" },
                        { "type": "output_text", "text": "illustration of 1776", "annotations": [] }
                    ]
                }
            ]
        }))
        .unwrap();
        assert_eq!(body.text(), "A cinematic illustration of 1776");
    }

    #[test]
    fn text_prefers_top_level_output_text() {
        let body: ResponsesResponse = serde_json::from_value(serde_json::json!({
            "output_text": "A prompt",
            "output": []
        }))
        .unwrap();
        assert_eq!(body.text(), "A prompt");
    }

    #[test]
    fn text_is_empty_without_messages() {
        let body: ResponsesResponse =
            serde_json::from_value(serde_json::json!({ "output": [] })).unwrap();
        assert!(body.text().is_empty());
    }

    #[test]
    fn prompt_request_serialises_template_variables() {
        let request = ResponsesRequest {
            prompt: PromptReference {
                id: "pmpt_1",
                version: "2",
                variables: PromptVariables {
                    style: "cinematic",
                    onthisdaydescription: "1776: Declaration",
                },
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "prompt": {
                    "id": "pmpt_1",
                    "version": "2",
                    "variables": {
                        "style": "cinematic",
                        "onthisdaydescription": "1776: Declaration"
                    }
                }
            })
        );
    }
}
