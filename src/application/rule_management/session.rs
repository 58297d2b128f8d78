//! Interactive editing loop over a short URL's rule list.

use std::sync::LazyLock;

use regex::Regex;

use super::priority::{clamp_priority, insert_rule, move_rule, normalize, remove_rule};
use super::prompter::{PromptError, Prompter};
use crate::domain::entities::ShortUrl;
use crate::domain::redirect::{DeviceType, RedirectCondition, RedirectRule};
use crate::utils::long_url::validate_long_url;

static LANGUAGE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Add,
    Remove,
    Rearrange,
    Save,
    Discard,
}

impl Action {
    const ALL: [Action; 6] = [
        Action::List,
        Action::Add,
        Action::Remove,
        Action::Rearrange,
        Action::Save,
        Action::Discard,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::List => "List rules",
            Action::Add => "Add rule",
            Action::Remove => "Remove rule",
            Action::Rearrange => "Re-arrange rule",
            Action::Save => "Save and exit",
            Action::Discard => "Discard changes",
        }
    }
}

const CONDITION_KINDS: [&str; 3] = ["Device", "Language", "Query param"];

/// Runs the editing session for `short_url`.
///
/// Returns the edited list (dense priorities) on "Save and exit" and `None` on
/// "Discard changes". Nothing is persisted here.
///
/// # Errors
///
/// Returns [`PromptError`] if the terminal fails or the operator aborts a prompt.
pub fn run_rule_session(
    prompter: &mut dyn Prompter,
    short_url: &ShortUrl,
) -> Result<Option<Vec<RedirectRule>>, PromptError> {
    let mut rules = normalize(short_url.rules());

    prompter.info(&format!(
        "Editing redirect rules of {} (default target: {})",
        short_url.identifier(),
        short_url.long_url
    ));

    loop {
        let labels: Vec<String> = Action::ALL.iter().map(|a| a.label().to_string()).collect();
        let action = pick(prompter, "What do you want to do?", &labels, &Action::ALL)?;

        rules = match action {
            Action::List => rules,
            Action::Add => add_rule(prompter, &rules)?,
            Action::Remove => remove_selected_rule(prompter, &rules)?,
            Action::Rearrange => rearrange_rule(prompter, &rules)?,
            Action::Save => return Ok(Some(rules)),
            Action::Discard => return Ok(None),
        };

        show_rules(prompter, &rules);
    }
}

fn pick<T: Copy>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    labels: &[String],
    values: &[T],
) -> Result<T, PromptError> {
    let index = prompter.select(prompt, labels)?;
    values
        .get(index)
        .copied()
        .ok_or_else(|| PromptError::Terminal(format!("selection {index} out of range")))
}

fn show_rules(prompter: &mut dyn Prompter, rules: &[RedirectRule]) {
    if rules.is_empty() {
        prompter.info("No redirect rules. Every request goes to the default target.");
        return;
    }

    let rows: Vec<Vec<String>> = rules
        .iter()
        .map(|rule| {
            vec![
                rule.priority().to_string(),
                rule.conditions_summary(),
                rule.long_url().to_string(),
            ]
        })
        .collect();

    prompter.table(&["Priority", "Conditions", "Target"], &rows);
}

fn rule_labels(rules: &[RedirectRule]) -> Vec<String> {
    rules
        .iter()
        .map(|rule| format!("{}. {} ({})", rule.priority(), rule.long_url(), rule.conditions_summary()))
        .collect()
}

/// Parses a whole number, saturating values too large for `i64`.
fn parse_priority(input: &str) -> Option<i64> {
    let input = input.trim();
    let digits = input.strip_prefix('-').unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match input.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if input.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

fn validate_priority(input: &str) -> Result<(), String> {
    parse_priority(input)
        .map(|_| ())
        .ok_or_else(|| "Priority must be a whole number".to_string())
}

fn ask_priority(prompter: &mut dyn Prompter, prompt: &str, upper: usize) -> Result<u32, PromptError> {
    let raw = prompter.input(&format!("{prompt} (1-{upper})"), &validate_priority)?;
    let requested = parse_priority(&raw).unwrap_or(1);
    Ok(clamp_priority(requested, upper))
}

fn add_rule(
    prompter: &mut dyn Prompter,
    rules: &[RedirectRule],
) -> Result<Vec<RedirectRule>, PromptError> {
    let priority = ask_priority(prompter, "Priority", rules.len() + 1)?;

    let long_url = prompter.input("Long URL", &|input| {
        validate_long_url(input)
            .map(|_| ())
            .map_err(|e| e.to_string())
    })?;

    let mut conditions = Vec::new();
    loop {
        conditions.push(ask_condition(prompter)?);
        if !prompter.confirm("Add another condition?", false)? {
            break;
        }
    }

    match RedirectRule::new(priority, &long_url, conditions) {
        Ok(rule) => {
            prompter.info(&format!("Rule added with priority {priority}"));
            Ok(insert_rule(rules, rule))
        }
        Err(e) => {
            prompter.warn(&e.to_string());
            Ok(rules.to_vec())
        }
    }
}

fn ask_condition(prompter: &mut dyn Prompter) -> Result<RedirectCondition, PromptError> {
    let kinds: Vec<String> = CONDITION_KINDS.iter().map(|k| k.to_string()).collect();
    let kind = prompter.select("Condition type", &kinds)?;

    match kind {
        0 => {
            let labels: Vec<String> = DeviceType::ALL.iter().map(|d| d.to_string()).collect();
            let device = pick(prompter, "Device", &labels, &DeviceType::ALL)?;
            Ok(RedirectCondition::device(device))
        }
        1 => {
            let code = prompter.input("Language code (e.g. en, es-ES)", &|input| {
                if LANGUAGE_CODE_REGEX.is_match(input.trim()) {
                    Ok(())
                } else {
                    Err("Not a valid language code".to_string())
                }
            })?;
            Ok(RedirectCondition::language(code.trim()))
        }
        2 => {
            let name = prompter.input("Query param name", &|input| {
                let input = input.trim();
                if input.is_empty() || input.contains(char::is_whitespace) {
                    Err("Param name must be non-empty and without spaces".to_string())
                } else {
                    Ok(())
                }
            })?;
            if !prompter.confirm("Require a specific value?", false)? {
                return Ok(RedirectCondition::query_param(name.trim(), None));
            }

            let value = prompter.input("Query param value (may be empty)", &|_| Ok(()))?;
            Ok(RedirectCondition::query_param(name.trim(), Some(value.trim())))
        }
        other => Err(PromptError::Terminal(format!("selection {other} out of range"))),
    }
}

fn remove_selected_rule(
    prompter: &mut dyn Prompter,
    rules: &[RedirectRule],
) -> Result<Vec<RedirectRule>, PromptError> {
    if rules.is_empty() {
        prompter.warn("There are no rules to remove");
        return Ok(rules.to_vec());
    }

    let index = prompter.select("Rule to remove", &rule_labels(rules))?;
    Ok(remove_rule(rules, index))
}

fn rearrange_rule(
    prompter: &mut dyn Prompter,
    rules: &[RedirectRule],
) -> Result<Vec<RedirectRule>, PromptError> {
    if rules.is_empty() {
        prompter.warn("There are no rules to re-arrange");
        return Ok(rules.to_vec());
    }

    let index = prompter.select("Rule to move", &rule_labels(rules))?;
    let position = ask_priority(prompter, "New priority", rules.len())?;
    Ok(move_rule(rules, index, position as i64))
}
