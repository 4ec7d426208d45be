//! Interactive Prompter
//!
//! Answers confirmation questions on the terminal with dialoguer.

use dialoguer::Confirm;

use crate::domain::ports::{Prompter, Question};

/// Prompter asking on stderr/stdin
///
/// Falls back to the question's default when the terminal cannot be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn confirm(&self, question: &Question) -> bool {
        if !question.description.is_empty() {
            eprintln!("{}", question.description);
        }
        let prompt = Confirm::new()
            .with_prompt(&question.message)
            .default(question.default);
        match prompt.interact() {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(question = %question.name, error = %err, "cannot prompt, using default");
                question.default
            }
        }
    }
}
