//! Reply drafting for classified emails.

use std::sync::Arc;

use tracing::debug;

use crate::error::LlmError;
use crate::llm::provider::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::category::Category;
use crate::pipeline::types::Email;

/// System message for reply generation.
pub const RESPONDER_SYSTEM_PROMPT: &str =
    "You are a customer service agent responding to an email";

/// Max tokens for a drafted reply.
const RESPONSE_MAX_TOKENS: u32 = 1024;

/// Asks the completion service to draft a reply. One call, no retry.
pub struct ResponseGenerator {
    llm: Arc<dyn LlmProvider>,
    temperature: f32,
}

impl ResponseGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, temperature: f32) -> Self {
        Self { llm, temperature }
    }

    /// Draft a professional reply to `email` given its category.
    ///
    /// Fails with `LlmError::EmptyResponse` when no text comes back.
    pub async fn generate(&self, email: &Email, category: Category) -> Result<String, LlmError> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(RESPONDER_SYSTEM_PROMPT),
            ChatMessage::user(build_response_prompt(email, category)),
        ])
        .with_temperature(self.temperature)
        .with_max_tokens(RESPONSE_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse {
                provider: self.llm.model_name().to_string(),
            });
        }

        debug!(
            email_id = %email.id,
            output_tokens = response.output_tokens,
            "Generated reply"
        );
        Ok(response.content)
    }
}

fn build_response_prompt(email: &Email, category: Category) -> String {
    format!(
        "Write a professional response to the following email based on the classification: {}\n\n{}",
        category, email.body
    )
}
