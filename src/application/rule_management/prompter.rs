//! Interactive I/O used by the rule editing session.

use thiserror::Error;

/// Failure of the interactive terminal itself.
///
/// Invalid answers are not errors: they are rejected by the validator passed to
/// [`Prompter::input`] and asked again.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("prompt cancelled")]
    Cancelled,
}

/// Validator for free-text answers. `Err` carries the message shown to the operator.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Operator interaction primitives.
pub trait Prompter {
    /// Prints a table.
    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]);

    /// Asks the operator to pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, PromptError>;

    /// Asks for text until `validator` accepts it.
    fn input(&mut self, prompt: &str, validator: Validator<'_>) -> Result<String, PromptError>;

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError>;

    fn info(&mut self, message: &str);

    fn warn(&mut self, message: &str);
}
