//! Terminal prompter for the admin CLI.

use colored::*;
use dialoguer::{Confirm, Input, Select};

use crate::application::rule_management::{PromptError, Prompter};
use crate::application::rule_management::prompter::Validator;

/// [`Prompter`] backed by `dialoguer` widgets and `colored` output.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn terminal_error(e: dialoguer::Error) -> PromptError {
    PromptError::Terminal(e.to_string())
}

/// Column widths fitting both headers and cells.
fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

impl Prompter for DialoguerPrompter {
    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        let widths = column_widths(headers, rows);

        println!();
        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| format!("{header:<width$}"))
            .collect();
        println!("  {}", header_line.join("  ").bright_white().bold());

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        println!("  {}", "─".repeat(total).bright_black());

        for row in rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            println!("  {}", cells.join("  "));
        }
        println!();
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, PromptError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(terminal_error)?
            .ok_or(PromptError::Cancelled)
    }

    fn input(&mut self, prompt: &str, validator: Validator<'_>) -> Result<String, PromptError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|input: &String| validator(input))
            .interact_text()
            .map_err(terminal_error)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(terminal_error)
    }

    fn info(&mut self, message: &str) {
        println!("{}", message.cyan());
    }

    fn warn(&mut self, message: &str) {
        println!("{}", format!("⚠️  {message}").yellow());
    }
}
