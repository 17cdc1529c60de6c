use otd_openai::OpenAiError;
use otd_twitter::TwitterError;
use thiserror::Error;

use crate::pipeline::Stage;

/// Why a pipeline run stopped.
///
/// Stage failures are transparent: the message of the first failure is the
/// component's own message, untouched.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no historical fact available for today")]
    NoFact,

    #[error(transparent)]
    Prompt(OpenAiError),

    #[error(transparent)]
    Image(OpenAiError),

    #[error(transparent)]
    Publish(TwitterError),

    #[error("failed to build {component} client: {reason}")]
    Setup {
        component: &'static str,
        reason: String,
    },
}

impl PipelineError {
    /// The stage the run failed in, or `None` if it never started.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::NoFact => Some(Stage::FetchFact),
            Self::Prompt(_) => Some(Stage::GeneratePrompt),
            Self::Image(_) => Some(Stage::GenerateImage),
            Self::Publish(_) => Some(Stage::Publish),
            Self::Setup { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_failures_keep_the_component_message() {
        let err = PipelineError::Prompt(OpenAiError::Api {
            status: 500,
            message: "fail".to_string(),
        });
        assert_eq!(err.to_string(), "OpenAI API error (500): fail");
        assert_eq!(err.stage(), Some(Stage::GeneratePrompt));

        let err = PipelineError::Publish(TwitterError::InvalidInput("too long".to_string()));
        assert_eq!(err.to_string(), TwitterError::InvalidInput("too long".to_string()).to_string());
        assert_eq!(err.stage(), Some(Stage::Publish));
    }

    #[test]
    fn setup_failure_has_no_stage() {
        let err = PipelineError::Setup {
            component: "history",
            reason: "bad url".to_string(),
        };
        assert_eq!(err.stage(), None);
        assert_eq!(err.to_string(), "failed to build history client: bad url");
    }
}
