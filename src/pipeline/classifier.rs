//! Email classifier: prompt, completion with bounded retries, parsing.
//!
//! Every attempt ends in one of three outcomes:
//! - `Classified`: a valid category was parsed, return immediately
//! - `Unparseable`: the call worked but the text was unusable, try again
//! - `Failed`: the completion call itself failed, back off and try again
//!
//! Both failure kinds draw from the same attempt budget. Running out because
//! of unparseable answers yields `Ok(None)`; running out on a failed call
//! is an error.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::config::ClassifierConfig;
use crate::error::{ClassifyError, LlmError};
use crate::llm::provider::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::category::{Category, Confidence};
use crate::pipeline::prompt::PromptBuilder;
use crate::pipeline::types::{ClassificationResult, Email};

/// System message sent with every classification attempt.
pub const CLASSIFIER_SYSTEM_PROMPT: &str =
    "You are an expert email classifier. Always classify emails into exactly one category.";

/// The answer is two short lines; no need for more.
const CLASSIFY_MAX_TOKENS: u32 = 64;

static CLASSIFICATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)classification:\s*([a-z_]+)").expect("classification pattern is valid")
});

static CONFIDENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)confidence:\s*([a-z]+)").expect("confidence pattern is valid")
});

/// Why a completion text did not yield a category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    #[error("response lacks a classification or confidence line")]
    Unparseable,

    #[error("invalid classification received: {0}")]
    InvalidCategory(String),
}

/// Parse a completion into a classification.
///
/// Both the `classification:` and `confidence:` lines must be present, in
/// any order; the first match of each wins. The confidence token is not
/// validated.
pub fn parse_classification(text: &str) -> Result<ClassificationResult, ParseFailure> {
    let classification = CLASSIFICATION_LINE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());
    let confidence = CONFIDENCE_LINE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());

    let (Some(label), Some(confidence)) = (classification, confidence) else {
        return Err(ParseFailure::Unparseable);
    };

    let category =
        Category::parse(label).ok_or_else(|| ParseFailure::InvalidCategory(label.to_string()))?;

    Ok(ClassificationResult {
        category,
        confidence: Confidence::parse(confidence),
    })
}

/// Outcome of a single classification attempt.
#[derive(Debug)]
enum AttemptOutcome {
    Classified(ClassificationResult),
    Unparseable(ParseFailure),
    Failed(LlmError),
}

/// Classifies emails into a `Category` using the completion service.
pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
    prompts: PromptBuilder,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(llm: Arc<dyn LlmProvider>, prompts: PromptBuilder, config: ClassifierConfig) -> Self {
        Self {
            llm,
            prompts,
            config,
        }
    }

    /// Classify one email.
    ///
    /// Returns `Ok(None)` when every attempt produced an unusable answer and
    /// `Err` when the final attempt's completion call failed.
    pub async fn classify(
        &self,
        email: &Email,
    ) -> Result<Option<ClassificationResult>, ClassifyError> {
        let prompt = self.prompts.build_prompt(email);
        let max_attempts = self.config.max_retries.max(1);

        for attempt in 1..=max_attempts {
            match self.attempt(&prompt).await {
                AttemptOutcome::Classified(result) => {
                    info!(
                        email_id = %email.id,
                        attempt,
                        category = %result.category,
                        confidence = %result.confidence,
                        "Email classified"
                    );
                    return Ok(Some(result));
                }
                AttemptOutcome::Unparseable(failure) => {
                    warn!(
                        email_id = %email.id,
                        attempt,
                        error = %failure,
                        "Could not use classification response"
                    );
                }
                AttemptOutcome::Failed(e) => {
                    error!(
                        email_id = %email.id,
                        attempt,
                        error = %e,
                        "Classification attempt failed"
                    );
                    if attempt == max_attempts {
                        return Err(ClassifyError::RetriesExhausted {
                            email_id: email.id.clone(),
                            attempts: max_attempts,
                            source: e,
                        });
                    }
                    tokio::time::sleep(self.config.retry_backoff).await;
                }
            }
        }

        warn!(
            email_id = %email.id,
            attempts = max_attempts,
            "No valid classification after all attempts"
        );
        Ok(None)
    }

    async fn attempt(&self, prompt: &str) -> AttemptOutcome {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(CLASSIFIER_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_temperature(self.config.temperature)
        .with_max_tokens(CLASSIFY_MAX_TOKENS);

        let response = match self.llm.complete(request).await {
            Ok(response) => response,
            Err(e) => return AttemptOutcome::Failed(e),
        };

        let normalized = response.content.trim().to_lowercase();
        debug!(raw_response = %normalized, "Classification response");

        match parse_classification(&normalized) {
            Ok(result) => AttemptOutcome::Classified(result),
            Err(failure) => AttemptOutcome::Unparseable(failure),
        }
    }
}
