//! Prompter Port
//!
//! Answers yes/no questions registered by the lifecycle. The orchestrator
//! owns the prompter; the controller only records the answers.

use serde::{Deserialize, Serialize};

/// A yes/no question asked between Load and Create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable key the answer is stored under
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub description: String,
    pub default: bool,
}

impl Question {
    pub fn confirm(name: impl Into<String>, message: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            description: String::new(),
            default,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Source of answers
///
/// Implementations:
/// - `DialoguerPrompter`: asks on the terminal
/// - `DefaultPrompter`: takes every default (non-interactive, `--yes`)
pub trait Prompter {
    fn confirm(&self, question: &Question) -> bool;
}

/// Always answers with the question's default
pub struct DefaultPrompter;

impl Prompter for DefaultPrompter {
    fn confirm(&self, question: &Question) -> bool {
        question.default
    }
}
