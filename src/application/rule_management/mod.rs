//! Interactive redirect rule editing.
//!
//! [`session::run_rule_session`] drives a [`prompter::Prompter`] over an
//! immutable working list; [`priority`] holds the list operations.

pub mod priority;
pub mod prompter;
pub mod session;

pub use priority::{insert_rule, move_rule, remove_rule};
pub use prompter::{PromptError, Prompter};
pub use session::run_rule_session;
