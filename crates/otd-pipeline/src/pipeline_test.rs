use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use otd_core::{GeneratedImage, HistoricalFact, ImagePrompt, PublishResult};
use otd_openai::OpenAiError;
use otd_twitter::TwitterError;

use super::*;

type CallLog = Arc<Mutex<Vec<String>>>;

fn record(log: &CallLog, call: String) {
    log.lock().unwrap().push(call);
}

struct FakeFacts {
    fact: Option<HistoricalFact>,
    log: CallLog,
}

#[async_trait]
impl FactSource for FakeFacts {
    async fn fetch_fact(&self) -> Option<HistoricalFact> {
        record(&self.log, "fetch_fact".to_string());
        self.fact.clone()
    }
}

struct FakePrompts {
    failure: Option<&'static str>,
    log: CallLog,
}

#[async_trait]
impl PromptSource for FakePrompts {
    async fn generate_prompt(&self, fact: &str, style: &str) -> Result<ImagePrompt, OpenAiError> {
        record(&self.log, format!("generate_prompt({fact}, {style})"));
        match self.failure {
            Some(message) => Err(OpenAiError::Api {
                status: 500,
                message: message.to_string(),
            }),
            None => Ok(ImagePrompt {
                prompt: "A cinematic illustration of 1776".to_string(),
                style: style.to_string(),
            }),
        }
    }
}

struct FakeImages {
    failure: Option<&'static str>,
    log: CallLog,
}

#[async_trait]
impl ImageSource for FakeImages {
    async fn generate_image(
        &self,
        prompt: &str,
        persist_locally: bool,
    ) -> Result<GeneratedImage, OpenAiError> {
        record(&self.log, format!("generate_image({prompt}, {persist_locally})"));
        match self.failure {
            Some(message) => Err(OpenAiError::MissingOutput(message.to_string())),
            None => Ok(GeneratedImage {
                bytes: vec![1, 2, 3],
                saved_to: None,
            }),
        }
    }
}

struct FakePublisher {
    failure: Option<&'static str>,
    log: CallLog,
}

#[async_trait]
impl PostPublisher for FakePublisher {
    async fn publish(&self, image: &[u8], text: &str) -> Result<PublishResult, TwitterError> {
        record(&self.log, format!("publish({image:?}, {text})"));
        match self.failure {
            Some(message) => Err(TwitterError::Api {
                status: 403,
                message: message.to_string(),
            }),
            None => Ok(PublishResult {
                id: "42".to_string(),
                text: "...".to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct Failures {
    prompt: Option<&'static str>,
    image: Option<&'static str>,
    publish: Option<&'static str>,
}

fn declaration() -> HistoricalFact {
    HistoricalFact::new(
        Some("1776".to_string()),
        "Declaration of Independence was signed",
    )
}

fn pipeline(fact: Option<HistoricalFact>, failures: Failures) -> (Pipeline, CallLog) {
    let log = CallLog::default();
    let pipeline = Pipeline::new(
        Arc::new(FakeFacts {
            fact,
            log: Arc::clone(&log),
        }),
        Arc::new(FakePrompts {
            failure: failures.prompt,
            log: Arc::clone(&log),
        }),
        Arc::new(FakeImages {
            failure: failures.image,
            log: Arc::clone(&log),
        }),
        Arc::new(FakePublisher {
            failure: failures.publish,
            log: Arc::clone(&log),
        }),
    );
    (pipeline, log)
}

fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[tokio::test]
async fn run_chains_every_stage_in_order() {
    let (pipeline, log) = pipeline(Some(declaration()), Failures::default());

    let result = pipeline.run().await.expect("run should succeed");

    assert_eq!(
        result,
        PublishResult {
            id: "42".to_string(),
            text: "...".to_string(),
        }
    );
    assert_eq!(
        calls(&log),
        vec![
            "fetch_fact".to_string(),
            "generate_prompt(1776: Declaration of Independence was signed, cinematic)".to_string(),
            "generate_image(A cinematic illustration of 1776, false)".to_string(),
            "publish([1, 2, 3], 1776: Declaration of Independence was signed)".to_string(),
        ]
    );
}

#[tokio::test]
async fn style_and_persistence_are_passed_through() {
    let (pipeline, log) = pipeline(Some(declaration()), Failures::default());
    let pipeline = pipeline.with_style("watercolor").with_persist_locally(true);

    pipeline.run().await.expect("run should succeed");

    let calls = calls(&log);
    assert!(calls[1].ends_with(", watercolor)"), "got: {calls:?}");
    assert!(calls[2].ends_with(", true)"), "got: {calls:?}");
}

#[tokio::test]
async fn missing_fact_aborts_before_prompt() {
    let (pipeline, log) = pipeline(None, Failures::default());

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, PipelineError::NoFact));
    assert_eq!(err.stage(), Some(Stage::FetchFact));
    assert_eq!(calls(&log), vec!["fetch_fact".to_string()]);
}

#[tokio::test]
async fn prompt_failure_skips_remaining_stages() {
    let (pipeline, log) = pipeline(
        Some(declaration()),
        Failures {
            prompt: Some("fail"),
            ..Failures::default()
        },
    );

    let err = pipeline.run().await.unwrap_err();

    assert_eq!(err.to_string(), "OpenAI API error (500): fail");
    assert_eq!(err.stage(), Some(Stage::GeneratePrompt));
    assert_eq!(calls(&log).len(), 2);
}

#[tokio::test]
async fn image_failure_skips_publish() {
    let (pipeline, log) = pipeline(
        Some(declaration()),
        Failures {
            image: Some("no image URL"),
            ..Failures::default()
        },
    );

    let err = pipeline.run().await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::GenerateImage));
    assert_eq!(
        err.to_string(),
        OpenAiError::MissingOutput("no image URL".to_string()).to_string()
    );
    assert_eq!(calls(&log).len(), 3);
}

#[tokio::test]
async fn publish_failure_message_is_unchanged() {
    let (pipeline, log) = pipeline(
        Some(declaration()),
        Failures {
            publish: Some("fail-tweet"),
            ..Failures::default()
        },
    );

    let err = pipeline.run().await.unwrap_err();

    assert_eq!(err.to_string(), "Twitter API error (403): fail-tweet");
    assert_eq!(err.stage(), Some(Stage::Publish));
    assert_eq!(calls(&log).len(), 4);
}

#[test]
fn stage_names_are_snake_case() {
    assert_eq!(Stage::FetchFact.to_string(), "fetch_fact");
    assert_eq!(Stage::GeneratePrompt.to_string(), "generate_prompt");
    assert_eq!(Stage::GenerateImage.to_string(), "generate_image");
    assert_eq!(Stage::Publish.to_string(), "publish");
    assert_eq!(Stage::Done.to_string(), "done");
}

#[test]
fn new_pipeline_uses_defaults() {
    let (pipeline, _log) = pipeline(None, Failures::default());
    assert_eq!(pipeline.style(), DEFAULT_STYLE);
    assert!(!pipeline.persists_locally());
}
