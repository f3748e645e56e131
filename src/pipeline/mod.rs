//! Email classification and dispatch pipeline.
//!
//! Every email flows through:
//! 1. `PromptBuilder::build_prompt()`: few-shot classification prompt
//! 2. `Classifier::classify()`: LLM call with bounded retries + parsing
//! 3. `HandlerRegistry::dispatch()`: reply drafting + category side effect
//!
//! `EmailAutomation` drives the sequence and isolates failures per email.

pub mod category;
pub mod classifier;
pub mod examples;
pub mod handlers;
pub mod orchestrator;
pub mod prompt;
pub mod responder;
pub mod types;

pub use category::{Category, Confidence};
pub use classifier::{Classifier, ParseFailure, parse_classification};
pub use examples::{Example, default_examples, load_examples};
pub use handlers::{HandlerRegistry, LogSink, SideEffect, SideEffectSink};
pub use orchestrator::{CLASSIFICATION_FAILED, EmailAutomation};
pub use prompt::PromptBuilder;
pub use responder::ResponseGenerator;
pub use types::{ClassificationResult, Email, EmailRecord, ProcessingResult};
