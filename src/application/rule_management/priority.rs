//! Pure operations over a rule list that keep priorities dense.
//!
//! Every function takes the current list by reference and returns a new list
//! whose priorities are exactly `1..=N` in evaluation order.

use crate::domain::redirect::RedirectRule;

/// Clamps an operator-entered priority into `[1, upper]`.
pub fn clamp_priority(requested: i64, upper: usize) -> u32 {
    let upper = upper.max(1) as i64;
    requested.clamp(1, upper) as u32
}

/// Sorts by priority (stable) and renumbers `1..=N`.
pub fn normalize(rules: &[RedirectRule]) -> Vec<RedirectRule> {
    let mut sorted: Vec<&RedirectRule> = rules.iter().collect();
    sorted.sort_by_key(|rule| rule.priority());
    renumber(sorted.into_iter().cloned().collect())
}

/// Inserts `rule` at its own priority, clamped to `[1, n + 1]`.
///
/// Rules at or after that position shift down by one.
pub fn insert_rule(rules: &[RedirectRule], rule: RedirectRule) -> Vec<RedirectRule> {
    let mut list = normalize(rules);
    let position = clamp_priority(rule.priority() as i64, list.len() + 1) as usize;
    list.insert(position - 1, rule);
    renumber(list)
}

/// Removes the rule at `index` in evaluation order.
///
/// Out-of-range indexes leave the list unchanged.
pub fn remove_rule(rules: &[RedirectRule], index: usize) -> Vec<RedirectRule> {
    let mut list = normalize(rules);
    if index < list.len() {
        list.remove(index);
    }
    renumber(list)
}

/// Moves the rule at `index` to `new_priority`, clamped to `[1, n]`.
pub fn move_rule(rules: &[RedirectRule], index: usize, new_priority: i64) -> Vec<RedirectRule> {
    let mut list = normalize(rules);
    if index >= list.len() {
        return list;
    }

    let target = clamp_priority(new_priority, list.len()) as usize;
    let rule = list.remove(index);
    let mut list = renumber(list);
    list.insert(target - 1, rule);
    renumber(list)
}

fn renumber(rules: Vec<RedirectRule>) -> Vec<RedirectRule> {
    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| rule.with_priority(index as u32 + 1))
        .collect()
}
