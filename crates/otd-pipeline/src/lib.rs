//! Pipeline controller for the on-this-day image poster.
//!
//! Chains fact lookup, prompt writing, image rendering and publishing, and
//! translates the outcome into an invocation response.

pub mod error;
pub mod handler;
pub mod pipeline;
pub mod stages;

pub use error::PipelineError;
pub use handler::{handle_invocation, invoke, respond, InvocationResponse, SUCCESS_MESSAGE};
pub use pipeline::{Pipeline, Stage, DEFAULT_STYLE};
pub use stages::{FactSource, ImageSource, PostPublisher, PromptSource};
