//! Classification prompt construction.

use crate::pipeline::category::Category;
use crate::pipeline::examples::{Example, default_examples};
use crate::pipeline::types::Email;

/// Trailing instruction describing the expected answer shape.
pub const OUTPUT_FORMAT: &str = "Provide your answer in this format:\n\
                                 Classification: [category]\n\
                                 Confidence: [high/medium/low]";

/// Renders classification prompts from a fixed example catalogue.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    examples: Vec<Example>,
}

impl PromptBuilder {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Build the prompt for one email.
    ///
    /// Subject and body are embedded verbatim, without escaping.
    pub fn build_prompt(&self, email: &Email) -> String {
        let mut prompt = String::with_capacity(512 + email.body.len());

        prompt.push_str(&format!(
            "Classify the following email into exactly one of these categories: {}.\n\n",
            Category::all_values().join(", ")
        ));

        prompt.push_str("For reference, here are some examples of email categories:\n");
        prompt.push_str(&self.format_examples());
        prompt.push_str("\n\n");

        prompt.push_str("Now classify this email:\n");
        prompt.push_str(&format!("Subject: {}\n", email.subject));
        prompt.push_str(&format!("Body: {}\n\n", email.body));

        prompt.push_str(OUTPUT_FORMAT);
        prompt
    }

    fn format_examples(&self) -> String {
        self.examples
            .iter()
            .enumerate()
            .map(|(i, example)| {
                format!(
                    "{}. Email: \"{}\"\nClassification: {}",
                    i + 1,
                    example.text,
                    example.category
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(default_examples())
    }
}
