//! Invocation boundary: turns a run's outcome into a status code and JSON body.

use otd_core::{AppConfig, PublishResult};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::PipelineError;
use crate::pipeline::Pipeline;

pub const SUCCESS_MESSAGE: &str = "Image generation completed successfully";

/// Function-as-a-service style response. `body` holds serialised JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    #[must_use]
    pub fn success(result: &PublishResult) -> Self {
        Self {
            status_code: 200,
            body: json!({
                "message": SUCCESS_MESSAGE,
                "post_id": result.id,
            })
            .to_string(),
        }
    }

    #[must_use]
    pub fn failure(message: &str) -> Self {
        Self {
            status_code: 500,
            body: json!({ "error": message }).to_string(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Maps a finished run to its response.
#[must_use]
pub fn respond(result: Result<PublishResult, PipelineError>) -> InvocationResponse {
    match result {
        Ok(result) => InvocationResponse::success(&result),
        Err(e) => InvocationResponse::failure(&e.to_string()),
    }
}

/// Runs `pipeline` once and maps the outcome.
pub async fn invoke(pipeline: &Pipeline) -> InvocationResponse {
    respond(pipeline.run().await)
}

/// Single entry point: wires the production clients and performs one run.
/// Failures never escape; they come back as a 500 response.
pub async fn handle_invocation(config: &AppConfig) -> InvocationResponse {
    match Pipeline::from_config(config) {
        Ok(pipeline) => invoke(&pipeline).await,
        Err(e) => {
            tracing::error!(error = %e, "failed to build pipeline");
            respond(Err(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(response: &InvocationResponse) -> serde_json::Value {
        serde_json::from_str(&response.body).expect("body should be JSON")
    }

    #[test]
    fn success_reports_post_id() {
        let response = respond(Ok(PublishResult {
            id: "42".to_string(),
            text: "1776: Declaration of Independence was signed".to_string(),
        }));

        assert_eq!(response.status_code, 200);
        assert!(response.is_success());
        assert_eq!(
            body(&response),
            json!({
                "message": "Image generation completed successfully",
                "post_id": "42"
            })
        );
    }

    #[test]
    fn failure_carries_error_message() {
        let response = respond(Err(PipelineError::NoFact));

        assert_eq!(response.status_code, 500);
        assert!(!response.is_success());
        assert_eq!(
            body(&response),
            json!({ "error": "no historical fact available for today" })
        );
    }

    #[test]
    fn serialises_with_camel_case_status_code() {
        let response = InvocationResponse::failure("boom \"quoted\"");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 500);
        let inner: serde_json::Value =
            serde_json::from_str(value["body"].as_str().unwrap()).unwrap();
        assert_eq!(inner["error"], "boom \"quoted\"");
    }
}
