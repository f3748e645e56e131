//! Error types for the email classifier.

use std::time::Duration;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Completion service errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Provider {provider} timed out after {timeout:?}")]
    Timeout { provider: String, timeout: Duration },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("Provider {provider} produced no text")]
    EmptyResponse { provider: String },
}

/// Classification errors that escape the retry loop.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Failed to classify email {email_id} after {attempts} attempts: {source}")]
    RetriesExhausted {
        email_id: String,
        attempts: u32,
        #[source]
        source: LlmError,
    },
}

/// Per-email pipeline errors. Caught by the orchestrator and turned into
/// error records.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Email record is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("Response generation failed: {0}")]
    Generation(#[from] LlmError),
}

/// Errors reading tabular input.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
