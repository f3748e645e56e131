use std::path::Path;

use anyhow::Context;

use email_classifier::config::{
    ClassifierConfig, DEFAULT_EXAMPLES_PATH, OutputFormat, load_dotenv_from,
};
use email_classifier::io::{read_emails, render_table, sample_emails};
use email_classifier::llm::{LlmConfig, create_provider};
use email_classifier::pipeline::{EmailAutomation, load_examples};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; real environment variables take precedence
    let dotenv = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|dir| Ok(load_dotenv_from(&dir)?));

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match dotenv {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "Loaded .env"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring .env file"),
    }

    let llm_config = LlmConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("  export OPENAI_API_KEY=sk-...");
        std::process::exit(1);
    });
    let classifier_config = ClassifierConfig::from_env().context("invalid classifier settings")?;
    let output: OutputFormat = std::env::var("OUTPUT_FORMAT")
        .ok()
        .map(|v| v.parse::<OutputFormat>())
        .transpose()
        .context("invalid OUTPUT_FORMAT")?
        .unwrap_or_default();

    eprintln!("📬 Email Classifier v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", llm_config.model);
    eprintln!(
        "   Retries: {} (backoff {:?}), temperature {}",
        classifier_config.max_retries, classifier_config.retry_backoff, classifier_config.temperature
    );

    let llm = create_provider(&llm_config)?;

    let examples_path =
        std::env::var("EXAMPLES_PATH").unwrap_or_else(|_| DEFAULT_EXAMPLES_PATH.to_string());
    let examples = load_examples(Path::new(&examples_path));
    eprintln!("   Few-shot examples: {}", examples.len());

    let emails = match std::env::var("EMAIL_CLASSIFIER_EMAILS") {
        Ok(path) => {
            eprintln!("   Emails: {}\n", path);
            read_emails(Path::new(&path))?
        }
        Err(_) => {
            eprintln!("   Emails: built-in samples\n");
            sample_emails()
        }
    };

    let automation = EmailAutomation::with_provider(llm, examples, classifier_config);
    let results = automation.process_batch(&emails).await;

    match output {
        OutputFormat::Table => {
            println!("\nResults:");
            print!("{}", render_table(&results));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
