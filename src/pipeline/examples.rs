//! Few-shot example catalogue.
//!
//! Examples come from a `text,category` CSV. Rows with an unknown category
//! are dropped with a warning; if the file cannot be read at all, or yields
//! nothing usable, the built-in defaults are used instead.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::SourceError;
use crate::pipeline::category::Category;

/// A labeled sample shown to the model inside the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub text: String,
    pub category: Category,
}

impl Example {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// Built-in examples, one per category except `other`.
pub fn default_examples() -> Vec<Example> {
    vec![
        Example::new(
            "Your product is broken and I want a refund",
            Category::Complaint,
        ),
        Example::new("What are your business hours?", Category::Inquiry),
        Example::new("Great service, thank you!", Category::Feedback),
        Example::new(
            "I need help installing the software",
            Category::SupportRequest,
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct ExampleRow {
    text: String,
    category: String,
}

/// Load examples from a CSV file, falling back to the defaults on failure.
pub fn load_examples(path: &Path) -> Vec<Example> {
    match read_examples(path) {
        Ok(examples) if !examples.is_empty() => {
            info!(
                path = %path.display(),
                count = examples.len(),
                "Loaded few-shot examples"
            );
            examples
        }
        Ok(_) => {
            warn!(
                path = %path.display(),
                "No valid few-shot examples found, using defaults"
            );
            default_examples()
        }
        Err(e) => {
            error!(error = %e, "Failed to load examples from CSV, using defaults");
            default_examples()
        }
    }
}

/// Read and validate every row. Rows with an unknown category are skipped.
pub fn read_examples(path: &Path) -> Result<Vec<Example>, SourceError> {
    let display = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| SourceError::Csv {
            path: display.clone(),
            source,
        })?;

    let mut examples = Vec::new();
    for row in reader.deserialize::<ExampleRow>() {
        let row = row.map_err(|source| SourceError::Csv {
            path: display.clone(),
            source,
        })?;
        match Category::parse(&row.category) {
            Some(category) => examples.push(Example::new(row.text, category)),
            None => warn!(category = %row.category, "Invalid category in CSV"),
        }
    }
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn defaults_cover_four_categories() {
        let examples = default_examples();
        assert_eq!(examples.len(), 4);
        assert!(examples.iter().all(|e| e.category != Category::Other));
    }

    #[test]
    fn loads_valid_rows() {
        let file = write_csv(
            "text,category\n\
             \"Where is my order?\",inquiry\n\
             \"Love the new update\",Feedback\n",
        );
        let examples = read_examples(file.path()).unwrap();
        assert_eq!(
            examples,
            vec![
                Example::new("Where is my order?", Category::Inquiry),
                Example::new("Love the new update", Category::Feedback),
            ]
        );
    }

    #[test]
    fn padded_category_cells_are_trimmed_by_reader() {
        let file = write_csv("text,category\n\"Is shipping free?\",  inquiry  \n");
        let examples = read_examples(file.path()).unwrap();
        assert_eq!(examples, vec![Example::new("Is shipping free?", Category::Inquiry)]);
    }

    #[test]
    fn drops_invalid_categories() {
        let file = write_csv(
            "text,category\n\
             \"This is outrageous\",complaint\n\
             \"Buy now!!!\",spam\n",
        );
        let examples = load_examples(file.path());
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].category, Category::Complaint);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let examples = load_examples(Path::new("/nonexistent/few_shot_examples.csv"));
        assert_eq!(examples, default_examples());
    }

    #[test]
    fn file_without_valid_rows_falls_back_to_defaults() {
        let file = write_csv("text,category\n\"???\",unknown\n");
        assert_eq!(load_examples(file.path()), default_examples());
    }

    #[test]
    fn malformed_header_is_an_error() {
        let file = write_csv("sample,label\n\"hi\",inquiry\n");
        assert!(read_examples(file.path()).is_err());
    }
}
