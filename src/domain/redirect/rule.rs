//! Prioritized conditional redirect rule.

use serde_json::json;

use super::condition::RedirectCondition;
use super::context::RequestContext;
use crate::error::AppError;
use crate::utils::long_url::validate_long_url;

/// A conditional override of a short URL's destination.
///
/// Lower priorities are evaluated first. A rule applies when every one of its
/// conditions matches; a rule without conditions always applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    priority: u32,
    long_url: String,
    conditions: Vec<RedirectCondition>,
}

impl RedirectRule {
    /// Creates a rule.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `priority` is 0 or `long_url` fails the
    /// same validation applied to a short URL's default target.
    pub fn new(
        priority: u32,
        long_url: &str,
        conditions: Vec<RedirectCondition>,
    ) -> Result<Self, AppError> {
        if priority == 0 {
            return Err(AppError::bad_request(
                "Rule priority must be at least 1",
                json!({ "priority": priority }),
            ));
        }

        validate_long_url(long_url).map_err(|e| {
            AppError::bad_request(
                "Invalid rule long URL",
                json!({ "long_url": long_url, "reason": e.to_string() }),
            )
        })?;

        Ok(Self {
            priority,
            long_url: long_url.trim().to_string(),
            conditions,
        })
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn long_url(&self) -> &str {
        &self.long_url
    }

    pub fn conditions(&self) -> &[RedirectCondition] {
        &self.conditions
    }

    /// Same rule at another position. Priorities below 1 are raised to 1.
    pub fn with_priority(&self, priority: u32) -> Self {
        Self {
            priority: priority.max(1),
            long_url: self.long_url.clone(),
            conditions: self.conditions.clone(),
        }
    }

    /// Logical AND over all conditions.
    pub fn applies_to(&self, context: &RequestContext) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(context))
    }

    /// Human-readable conditions, joined with "AND".
    pub fn conditions_summary(&self) -> String {
        if self.conditions.is_empty() {
            return "(always)".to_string();
        }

        self.conditions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::redirect::DeviceType;

    #[test]
    fn test_rule_requires_positive_priority() {
        let result = RedirectRule::new(0, "https://example.com", vec![]);
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_rule_requires_valid_long_url() {
        let result = RedirectRule::new(1, "javascript:alert(1)", vec![]);
        assert!(matches!(result, Err(AppError::Validation { .. })));

        let result = RedirectRule::new(1, "not a url", vec![]);
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_rule_applies_when_all_conditions_match() {
        let rule = RedirectRule::new(
            1,
            "https://example.com/m",
            vec![
                RedirectCondition::device(DeviceType::Mobile),
                RedirectCondition::query_param("ref", None),
            ],
        )
        .unwrap();

        let both = RequestContext::new()
            .with_device(Some(DeviceType::Mobile))
            .with_query_param("ref", Some("x"));
        let only_device = RequestContext::new().with_device(Some(DeviceType::Mobile));

        assert!(rule.applies_to(&both));
        assert!(!rule.applies_to(&only_device));
    }

    #[test]
    fn test_rule_without_conditions_always_applies() {
        let rule = RedirectRule::new(1, "https://example.com", vec![]).unwrap();
        assert!(rule.applies_to(&RequestContext::new()));
        assert_eq!(rule.conditions_summary(), "(always)");
    }

    #[test]
    fn test_with_priority_keeps_content() {
        let rule = RedirectRule::new(
            3,
            "https://example.com/es",
            vec![RedirectCondition::language("es")],
        )
        .unwrap();
        let moved = rule.with_priority(1);

        assert_eq!(moved.priority(), 1);
        assert_eq!(moved.long_url(), rule.long_url());
        assert_eq!(moved.conditions(), rule.conditions());
        assert_eq!(rule.with_priority(0).priority(), 1);
    }

    #[test]
    fn test_conditions_summary() {
        let rule = RedirectRule::new(
            1,
            "https://example.com",
            vec![
                RedirectCondition::device(DeviceType::Desktop),
                RedirectCondition::language("en"),
            ],
        )
        .unwrap();

        assert_eq!(rule.conditions_summary(), "device is desktop AND language is en");
    }
}
