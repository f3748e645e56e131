//! Email input and result output.
//!
//! - `read_emails()`: CSV with an `id,from,subject,body,timestamp` header
//! - `sample_emails()`: built-in demonstration batch
//! - `render_table()`: fixed-width text table of results

use std::path::Path;

use tracing::info;

use crate::error::SourceError;
use crate::pipeline::types::{EmailRecord, ProcessingResult};

/// Widest a table cell may get before it is truncated.
const MAX_CELL_WIDTH: usize = 48;

/// Read email rows from a CSV file.
///
/// A cell that is present but empty is kept as an empty string. A column
/// absent from the header reads as `None`, which the pipeline reports as a
/// missing field when it reaches that email.
pub fn read_emails(path: &Path) -> Result<Vec<EmailRecord>, SourceError> {
    let shown = path.display().to_string();
    let csv_error = |source: csv::Error| SourceError::Csv {
        path: shown.clone(),
        source,
    };
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: shown.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(csv_error)?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (id, from, subject, body, timestamp) = (
        column("id"),
        column("from"),
        column("subject"),
        column("body"),
        column("timestamp"),
    );

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let cell = |index: Option<usize>| index.map(|i| row.get(i).unwrap_or("").to_string());
        records.push(EmailRecord {
            id: cell(id),
            from: cell(from),
            subject: cell(subject),
            body: cell(body),
            timestamp: cell(timestamp),
        });
    }

    info!(path = %shown, count = records.len(), "Loaded emails");
    Ok(records)
}

/// Five demonstration emails, one per category.
pub fn sample_emails() -> Vec<EmailRecord> {
    let rows = [
        (
            "001",
            "angry.customer@example.com",
            "Broken product received",
            "I received my order #12345 yesterday but it arrived completely damaged. This is unacceptable and I demand a refund immediately. This is the worst customer service I've experienced.",
            "2024-03-15T10:30:00Z",
        ),
        (
            "002",
            "curious.shopper@example.com",
            "Question about product specifications",
            "Hi, I'm interested in buying your premium package but I couldn't find information about whether it's compatible with Mac OS. Could you please clarify this? Thanks!",
            "2024-03-15T11:45:00Z",
        ),
        (
            "003",
            "happy.user@example.com",
            "Amazing customer support",
            "I just wanted to say thank you for the excellent support I received from Sarah on your team. She went above and beyond to help resolve my issue. Keep up the great work!",
            "2024-03-15T13:15:00Z",
        ),
        (
            "004",
            "tech.user@example.com",
            "Need help with installation",
            "I've been trying to install the software for the past hour but keep getting error code 5123. I've already tried restarting my computer and clearing the cache. Please help!",
            "2024-03-15T14:20:00Z",
        ),
        (
            "005",
            "business.client@example.com",
            "Partnership opportunity",
            "Our company is interested in exploring potential partnership opportunities with your organization. Would it be possible to schedule a call next week to discuss this further?",
            "2024-03-15T15:00:00Z",
        ),
    ];

    rows.into_iter()
        .map(|(id, from, subject, body, timestamp)| EmailRecord {
            id: Some(id.to_string()),
            from: Some(from.to_string()),
            subject: Some(subject.to_string()),
            body: Some(body.to_string()),
            timestamp: Some(timestamp.to_string()),
        })
        .collect()
}

/// Render results as a text table.
pub fn render_table(results: &[ProcessingResult]) -> String {
    let header = ["email_id", "category", "response", "error"];
    let rows: Vec<[String; 4]> = results
        .iter()
        .map(|r| {
            [
                cell(Some(&r.email_id)),
                cell(r.category.as_deref()),
                cell(r.response.as_deref()),
                cell(r.error.as_deref()),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, values: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

/// Single-line, width-capped cell text.
fn cell(value: Option<&str>) -> String {
    let flat: String = value
        .unwrap_or("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        flat
    } else {
        let mut truncated: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
        truncated.push_str("...");
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::pipeline::category::Category;

    #[test]
    fn reads_email_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "id,from,subject,body,timestamp\n\
             001,a@example.com,Broken,\"Damaged, want refund\",2024-03-15T10:30:00Z\n\
             002,b@example.com,Question,,\n"
        )
        .unwrap();

        let records = read_emails(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("001"));
        assert_eq!(records[0].body.as_deref(), Some("Damaged, want refund"));
        assert!(records[0].validate().is_ok());
        // Empty cells are values, not missing fields.
        assert_eq!(records[1].body.as_deref(), Some(""));
        assert_eq!(records[1].timestamp.as_deref(), Some(""));
        assert!(records[1].validate().is_ok());
    }

    #[test]
    fn missing_columns_are_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "id,subject\n009,Hello\n").unwrap();

        let records = read_emails(file.path()).unwrap();
        assert_eq!(records[0].subject.as_deref(), Some("Hello"));
        assert!(records[0].body.is_none());
        assert!(records[0].validate().is_err());
    }

    #[test]
    fn whitespace_only_and_short_rows_read_as_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "id,from,subject,body,timestamp\n\
             010,a@example.com,Unsubscribe,   ,\n\
             011,b@example.com,Hi\n"
        )
        .unwrap();

        let records = read_emails(file.path()).unwrap();
        assert_eq!(records[0].body.as_deref(), Some(""));
        assert_eq!(records[1].body.as_deref(), Some(""));
        assert_eq!(records[1].timestamp.as_deref(), Some(""));
        let email = records[1].validate().unwrap();
        assert_eq!(email.subject, "Hi");
        assert_eq!(email.body, "");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_emails(Path::new("/nonexistent/emails.csv")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn samples_are_valid() {
        let samples = sample_emails();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|s| s.validate().is_ok()));
        assert_eq!(samples[0].subject.as_deref(), Some("Broken product received"));
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let results = vec![
            ProcessingResult::handled("001", Category::Complaint, "We are sorry\nfor this".into()),
            ProcessingResult::failed("002", "Classification failed"),
        ];
        let table = render_table(&results);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("email_id | category"));
        assert!(lines[1].contains("-+-"));
        assert!(lines[2].contains("complaint"));
        assert!(lines[2].contains("We are sorry for this"));
        assert!(lines[3].contains("Classification failed"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(200);
        let results = vec![ProcessingResult::handled("001", Category::Other, long)];
        let table = render_table(&results);
        assert!(table.contains(&format!("{}...", "x".repeat(MAX_CELL_WIDTH - 3))));
        assert!(!table.contains(&"x".repeat(MAX_CELL_WIDTH + 1)));
    }
}
