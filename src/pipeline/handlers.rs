//! Category handlers.
//!
//! Every category shares one handler: draft a reply, package the result,
//! then fire the category's side effect (if any). The side effect is picked
//! from a lookup table keyed by category:
//!
//! | Category        | Side effect            |
//! |-----------------|------------------------|
//! | complaint       | urgent ticket created  |
//! | inquiry         | none                   |
//! | feedback        | feedback logged        |
//! | support_request | support ticket created |
//! | other           | none                   |
//!
//! Ticketing and feedback systems are stubs: side effects are recorded
//! through a `SideEffectSink`, which by default only logs.

use std::collections::HashMap;

use tracing::info;

use crate::error::LlmError;
use crate::pipeline::category::Category;
use crate::pipeline::responder::ResponseGenerator;
use crate::pipeline::types::{Email, ProcessingResult};

/// A category-specific follow-up action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideEffect {
    UrgentTicket,
    FeedbackLogged,
    SupportTicket,
}

impl SideEffect {
    pub fn description(&self) -> &'static str {
        match self {
            Self::UrgentTicket => "urgent ticket created",
            Self::FeedbackLogged => "feedback logged",
            Self::SupportTicket => "support ticket created",
        }
    }
}

/// Receives side effects as handlers fire them.
pub trait SideEffectSink: Send + Sync {
    fn record(&self, email: &Email, effect: SideEffect);
}

/// Sink that only emits a log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SideEffectSink for LogSink {
    fn record(&self, email: &Email, effect: SideEffect) {
        info!(email_id = %email.id, effect = ?effect, "{}", effect.description());
    }
}

/// Category → side effect lookup.
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    side_effects: HashMap<Category, Option<SideEffect>>,
}

impl HandlerRegistry {
    /// The standard table.
    pub fn standard() -> Self {
        Self::empty()
            .with(Category::Complaint, Some(SideEffect::UrgentTicket))
            .with(Category::Inquiry, None)
            .with(Category::Feedback, Some(SideEffect::FeedbackLogged))
            .with(Category::SupportRequest, Some(SideEffect::SupportTicket))
            .with(Category::Other, None)
    }

    /// No registrations; every category falls through to the `other` handler.
    pub fn empty() -> Self {
        Self {
            side_effects: HashMap::new(),
        }
    }

    /// Register (or replace) the handler for a category.
    pub fn with(mut self, category: Category, side_effect: Option<SideEffect>) -> Self {
        self.side_effects.insert(category, side_effect);
        self
    }

    /// Side effect for `category`, falling back to the `other` entry.
    pub fn side_effect_for(&self, category: Category) -> Option<SideEffect> {
        self.side_effects
            .get(&category)
            .or_else(|| self.side_effects.get(&Category::Other))
            .copied()
            .flatten()
    }

    /// Run the handler registered for `category`.
    pub async fn dispatch(
        &self,
        responder: &ResponseGenerator,
        sink: &dyn SideEffectSink,
        email: &Email,
        category: Category,
    ) -> Result<ProcessingResult, LlmError> {
        handle(
            responder,
            sink,
            email,
            category,
            self.side_effect_for(category),
        )
        .await
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// The shared handler body.
pub async fn handle(
    responder: &ResponseGenerator,
    sink: &dyn SideEffectSink,
    email: &Email,
    category: Category,
    side_effect: Option<SideEffect>,
) -> Result<ProcessingResult, LlmError> {
    let response = responder.generate(email, category).await?;
    let result = ProcessingResult::handled(email.id.clone(), category, response);

    if let Some(effect) = side_effect {
        sink.record(email, effect);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider};

    #[derive(Default)]
    struct RecordingSink {
        effects: Mutex<Vec<(String, SideEffect)>>,
    }

    impl SideEffectSink for RecordingSink {
        fn record(&self, email: &Email, effect: SideEffect) {
            self.effects.lock().unwrap().push((email.id.clone(), effect));
        }
    }

    struct ReplyLlm(&'static str);

    #[async_trait::async_trait]
    impl LlmProvider for ReplyLlm {
        fn model_name(&self) -> &str {
            "mock-reply"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                content: self.0.to_string(),
                input_tokens: 0,
                output_tokens: 0,
            })
        }
    }

    fn responder(reply: &'static str) -> ResponseGenerator {
        ResponseGenerator::new(Arc::new(ReplyLlm(reply)), 0.3)
    }

    #[test]
    fn standard_table() {
        let registry = HandlerRegistry::standard();
        assert_eq!(
            registry.side_effect_for(Category::Complaint),
            Some(SideEffect::UrgentTicket)
        );
        assert_eq!(registry.side_effect_for(Category::Inquiry), None);
        assert_eq!(
            registry.side_effect_for(Category::Feedback),
            Some(SideEffect::FeedbackLogged)
        );
        assert_eq!(
            registry.side_effect_for(Category::SupportRequest),
            Some(SideEffect::SupportTicket)
        );
        assert_eq!(registry.side_effect_for(Category::Other), None);
    }

    #[test]
    fn unregistered_category_falls_back_to_other() {
        let registry = HandlerRegistry::empty().with(Category::Other, Some(SideEffect::FeedbackLogged));
        assert_eq!(
            registry.side_effect_for(Category::Complaint),
            Some(SideEffect::FeedbackLogged)
        );
        assert_eq!(HandlerRegistry::empty().side_effect_for(Category::Complaint), None);
    }

    #[test]
    fn descriptions() {
        assert_eq!(SideEffect::UrgentTicket.description(), "urgent ticket created");
        assert_eq!(SideEffect::FeedbackLogged.description(), "feedback logged");
        assert_eq!(SideEffect::SupportTicket.description(), "support ticket created");
    }

    #[tokio::test]
    async fn complaint_creates_urgent_ticket() {
        let sink = RecordingSink::default();
        let email = Email::new("001", "Broken product", "Damaged on arrival");

        let result = HandlerRegistry::standard()
            .dispatch(&responder("We are sorry"), &sink, &email, Category::Complaint)
            .await
            .unwrap();

        assert_eq!(
            result,
            ProcessingResult::handled("001", Category::Complaint, "We are sorry".into())
        );
        assert_eq!(
            *sink.effects.lock().unwrap(),
            vec![("001".to_string(), SideEffect::UrgentTicket)]
        );
    }

    #[tokio::test]
    async fn inquiry_fires_no_side_effect() {
        let sink = RecordingSink::default();
        let email = Email::new("002", "Mac support?", "Is it compatible with Mac OS?");

        let result = HandlerRegistry::standard()
            .dispatch(&responder("Yes it is"), &sink, &email, Category::Inquiry)
            .await
            .unwrap();

        assert_eq!(result.category.as_deref(), Some("inquiry"));
        assert_eq!(result.response.as_deref(), Some("Yes it is"));
        assert!(sink.effects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_generation_skips_side_effect() {
        let sink = RecordingSink::default();
        let email = Email::new("004", "Install help", "Error code 5123");

        let err = HandlerRegistry::standard()
            .dispatch(&responder(""), &sink, &email, Category::SupportRequest)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::EmptyResponse { .. }));
        assert!(sink.effects.lock().unwrap().is_empty());
    }
}
