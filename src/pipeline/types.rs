//! Shared types for the classification pipeline.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::pipeline::category::{Category, Confidence};

// ── Inbound email ───────────────────────────────────────────────────

/// An email row as it arrives from a tabular source.
///
/// Every column is optional here; required fields are checked per email by
/// `validate()` so one bad row cannot abort a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: Option<String>,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub timestamp: Option<String>,
}

impl EmailRecord {
    /// Identifier used in result records, even when the row is invalid.
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("unknown")
    }

    /// Check required fields and produce a pipeline `Email`.
    pub fn validate(&self) -> Result<Email, PipelineError> {
        let id = self
            .id
            .clone()
            .ok_or(PipelineError::MissingField { field: "id" })?;
        let subject = self
            .subject
            .clone()
            .ok_or(PipelineError::MissingField { field: "subject" })?;
        let body = self
            .body
            .clone()
            .ok_or(PipelineError::MissingField { field: "body" })?;

        Ok(Email {
            id,
            subject,
            body,
            from: self.from.clone(),
            timestamp: self.timestamp.clone(),
        })
    }
}

/// A validated email. Read-only for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub subject: String,
    pub body: String,
    /// Sender address. Not used for classification.
    pub from: Option<String>,
    /// When the email was sent, as given by the source. Not used for classification.
    pub timestamp: Option<String>,
}

impl Email {
    pub fn new(id: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            body: body.into(),
            from: None,
            timestamp: None,
        }
    }
}

// ── Classification ──────────────────────────────────────────────────

/// Parsed outcome of one classification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: Category,
    pub confidence: Confidence,
}

// ── Output record ───────────────────────────────────────────────────

/// Final per-email output. Exactly one of `response` / `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub email_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessingResult {
    /// A handled email with its generated reply.
    pub fn handled(email_id: impl Into<String>, category: Category, response: String) -> Self {
        Self {
            email_id: email_id.into(),
            category: Some(category.as_str().to_string()),
            response: Some(response),
            error: None,
        }
    }

    /// An email that could not be processed.
    pub fn failed(email_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            email_id: email_id.into(),
            category: None,
            response: None,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
