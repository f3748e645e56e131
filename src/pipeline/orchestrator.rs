//! Email automation: runs emails through classify → dispatch.
//!
//! Failures are isolated per email: whatever goes wrong becomes that email's
//! error record and the batch carries on.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::ClassifierConfig;
use crate::error::PipelineError;
use crate::llm::provider::LlmProvider;
use crate::pipeline::classifier::Classifier;
use crate::pipeline::examples::Example;
use crate::pipeline::handlers::{HandlerRegistry, LogSink, SideEffectSink};
use crate::pipeline::prompt::PromptBuilder;
use crate::pipeline::responder::ResponseGenerator;
use crate::pipeline::types::{EmailRecord, ProcessingResult};

/// Error text recorded when no category could be determined.
pub const CLASSIFICATION_FAILED: &str = "Classification failed";

/// The full pipeline.
pub struct EmailAutomation {
    classifier: Classifier,
    responder: ResponseGenerator,
    handlers: HandlerRegistry,
    sink: Arc<dyn SideEffectSink>,
}

impl EmailAutomation {
    pub fn new(
        classifier: Classifier,
        responder: ResponseGenerator,
        handlers: HandlerRegistry,
        sink: Arc<dyn SideEffectSink>,
    ) -> Self {
        Self {
            classifier,
            responder,
            handlers,
            sink,
        }
    }

    /// Standard wiring: one provider for both calls, the standard handler
    /// table and a logging sink.
    pub fn with_provider(
        llm: Arc<dyn LlmProvider>,
        examples: Vec<Example>,
        config: ClassifierConfig,
    ) -> Self {
        let responder = ResponseGenerator::new(Arc::clone(&llm), config.temperature);
        let classifier = Classifier::new(llm, PromptBuilder::new(examples), config);
        Self::new(
            classifier,
            responder,
            HandlerRegistry::standard(),
            Arc::new(LogSink),
        )
    }

    /// Replace the side-effect sink.
    pub fn with_sink(mut self, sink: Arc<dyn SideEffectSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Process one email. Never fails; errors become error records.
    pub async fn process_email(&self, record: &EmailRecord) -> ProcessingResult {
        let email_id = record.display_id().to_string();
        info!(email_id = %email_id, "Processing email");

        match self.try_process(record).await {
            Ok(result) => result,
            Err(e) => {
                error!(email_id = %email_id, error = %e, "Error processing email");
                ProcessingResult::failed(email_id, e.to_string())
            }
        }
    }

    /// Process emails in order, one result per input.
    pub async fn process_batch(&self, records: &[EmailRecord]) -> Vec<ProcessingResult> {
        let total = records.len();
        info!(total, "Processing email batch");

        let mut results = Vec::with_capacity(total);
        for record in records {
            results.push(self.process_email(record).await);
        }

        let failed = results.iter().filter(|r| r.is_error()).count();
        info!(
            total,
            handled = total - failed,
            failed,
            "Batch processing complete"
        );
        results
    }

    async fn try_process(&self, record: &EmailRecord) -> Result<ProcessingResult, PipelineError> {
        let email = record.validate()?;

        let Some(classification) = self.classifier.classify(&email).await? else {
            warn!(email_id = %email.id, "Could not classify email");
            return Ok(ProcessingResult::failed(email.id, CLASSIFICATION_FAILED));
        };

        let result = self
            .handlers
            .dispatch(
                &self.responder,
                self.sink.as_ref(),
                &email,
                classification.category,
            )
            .await?;
        Ok(result)
    }
}
