//! Configuration types.
//!
//! Everything is read once at startup and shared read-only afterwards.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default path of the few-shot example CSV.
pub const DEFAULT_EXAMPLES_PATH: &str = "data/few_shot_examples.csv";

/// Load the nearest `.env` file, searching `dir` and then its parents.
///
/// Entries never override variables already set in the process environment.
/// Returns the loaded file, or `None` when there is no `.env` to load.
pub fn load_dotenv_from(dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let Some(path) = dir
        .ancestors()
        .map(|d| d.join(".env"))
        .find(|candidate| candidate.is_file())
    else {
        return Ok(None);
    };

    dotenvy::from_path(&path).map_err(|e| ConfigError::InvalidValue {
        key: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Some(path))
}

/// Settings for the classification retry loop and completion sampling.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Maximum number of classification attempts per email.
    pub max_retries: u32,
    /// Pause after a failed completion call before the next attempt.
    pub retry_backoff: Duration,
    /// Sampling temperature for every completion call.
    pub temperature: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff: Duration::from_secs(1),
            temperature: 0.3,
        }
    }
}

impl ClassifierConfig {
    /// Build from `EMAIL_CLASSIFIER_*` environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_retries: u32 =
            parse_var(&lookup, "EMAIL_CLASSIFIER_MAX_RETRIES")?.unwrap_or(defaults.max_retries);
        if max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "EMAIL_CLASSIFIER_MAX_RETRIES".into(),
                message: "must be at least 1".into(),
            });
        }

        let retry_backoff = parse_var::<u64, _>(&lookup, "EMAIL_CLASSIFIER_RETRY_BACKOFF_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_backoff);

        let temperature: f32 =
            parse_var(&lookup, "EMAIL_CLASSIFIER_TEMPERATURE")?.unwrap_or(defaults.temperature);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                key: "EMAIL_CLASSIFIER_TEMPERATURE".into(),
                message: format!("{temperature} is outside 0.0..=2.0"),
            });
        }

        Ok(Self {
            max_retries,
            retry_backoff,
            temperature,
        })
    }
}

/// How results are printed by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: "OUTPUT_FORMAT".into(),
                message: format!("unknown format '{other}' (expected table or json)"),
            }),
        }
    }
}

/// Parse an optional variable, reporting the key on failure.
pub(crate) fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("'{raw}': {e}"),
            }),
    }
}
