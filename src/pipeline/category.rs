//! Classification labels and confidence levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of email categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Complaint,
    Inquiry,
    Feedback,
    SupportRequest,
    Other,
}

impl Category {
    const ALL: [Category; 5] = [
        Category::Complaint,
        Category::Inquiry,
        Category::Feedback,
        Category::SupportRequest,
        Category::Other,
    ];

    /// Every category, in declaration order.
    ///
    /// The order is stable within a build but is not part of the contract.
    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// Label strings of every category.
    pub fn all_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }

    /// Case-insensitive exact match against the label set.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complaint => "complaint",
            Self::Inquiry => "inquiry",
            Self::Feedback => "feedback",
            Self::SupportRequest => "support_request",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label is not in the category set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Self-reported model confidence. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
    /// Token outside high/medium/low, kept verbatim.
    Unrecognized(String),
}

impl Confidence {
    /// Never fails: unknown tokens are carried as `Unrecognized`.
    pub fn parse(raw: &str) -> Self {
        let token = raw.trim().to_ascii_lowercase();
        match token.as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unrecognized(token),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unrecognized(token) => token,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Category::parse("Complaint"), Some(Category::Complaint));
        assert_eq!(Category::parse("SUPPORT_REQUEST"), Some(Category::SupportRequest));
    }

    #[test]
    fn parse_does_not_trim() {
        assert_eq!(Category::parse(" inquiry "), None);
        assert_eq!(Category::parse("inquiry\n"), None);
    }

    #[test]
    fn parse_rejects_unknown_and_partial() {
        assert_eq!(Category::parse("urgent"), None);
        assert_eq!(Category::parse("support"), None);
        assert_eq!(Category::parse("complaints"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn all_values_covers_every_label() {
        let values = Category::all_values();
        assert_eq!(values.len(), 5);
        for label in ["complaint", "inquiry", "feedback", "support_request", "other"] {
            assert!(values.contains(&label), "missing {label}");
        }
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for category in Category::all() {
            assert_eq!(Category::parse(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn from_str_reports_bad_label() {
        let err = "spam".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category 'spam'");
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::SupportRequest).unwrap();
        assert_eq!(json, "\"support_request\"");
    }

    #[test]
    fn confidence_keeps_unknown_tokens() {
        assert_eq!(Confidence::parse("HIGH"), Confidence::High);
        assert_eq!(Confidence::parse("low"), Confidence::Low);
        assert_eq!(
            Confidence::parse("certain"),
            Confidence::Unrecognized("certain".into())
        );
        assert_eq!(Confidence::parse("certain").to_string(), "certain");
    }
}
