//! First-match destination selection.

use super::context::RequestContext;
use super::rule::RedirectRule;

/// Picks the destination for a request.
///
/// Rules are evaluated in ascending priority regardless of the order they are
/// passed in; the first rule that applies wins. Falls back to `default_long_url`
/// when no rule applies. Equal priorities keep their input order.
pub fn resolve_destination<'a>(
    rules: &'a [RedirectRule],
    default_long_url: &'a str,
    context: &RequestContext,
) -> &'a str {
    let mut ordered: Vec<&RedirectRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority());

    ordered
        .into_iter()
        .find(|rule| rule.applies_to(context))
        .map_or(default_long_url, |rule| rule.long_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::redirect::{DeviceType, RedirectCondition};

    const DEFAULT: &str = "https://example.com/default";

    fn scenario_rules() -> Vec<RedirectRule> {
        vec![
            RedirectRule::new(
                1,
                "https://example.com/m",
                vec![RedirectCondition::device(DeviceType::Mobile)],
            )
            .unwrap(),
            RedirectRule::new(
                2,
                "https://example.com/ref",
                vec![RedirectCondition::query_param("ref", None)],
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_mobile_without_ref_gets_mobile_target() {
        let context = RequestContext::new().with_device(Some(DeviceType::Mobile));
        assert_eq!(
            resolve_destination(&scenario_rules(), DEFAULT, &context),
            "https://example.com/m"
        );
    }

    #[test]
    fn test_desktop_with_ref_gets_ref_target() {
        let context = RequestContext::new()
            .with_device(Some(DeviceType::Desktop))
            .with_query_param("ref", Some("x"));
        assert_eq!(
            resolve_destination(&scenario_rules(), DEFAULT, &context),
            "https://example.com/ref"
        );
    }

    #[test]
    fn test_desktop_without_ref_gets_default() {
        let context = RequestContext::new().with_device(Some(DeviceType::Desktop));
        assert_eq!(
            resolve_destination(&scenario_rules(), DEFAULT, &context),
            DEFAULT
        );
    }

    #[test]
    fn test_first_match_wins_over_later_matches() {
        let context = RequestContext::new()
            .with_device(Some(DeviceType::Mobile))
            .with_query_param("ref", Some("x"));
        assert_eq!(
            resolve_destination(&scenario_rules(), DEFAULT, &context),
            "https://example.com/m"
        );
    }

    #[test]
    fn test_order_of_input_does_not_matter() {
        let mut reversed = scenario_rules();
        reversed.reverse();

        let context = RequestContext::new()
            .with_device(Some(DeviceType::Mobile))
            .with_query_param("ref", Some("x"));

        assert_eq!(
            resolve_destination(&reversed, DEFAULT, &context),
            resolve_destination(&scenario_rules(), DEFAULT, &context)
        );
    }

    #[test]
    fn test_empty_rules_return_default() {
        let context = RequestContext::new().with_device(Some(DeviceType::Mobile));
        assert_eq!(resolve_destination(&[], DEFAULT, &context), DEFAULT);
    }

    #[test]
    fn test_unconditional_rule_shadows_later_rules() {
        let rules = vec![
            RedirectRule::new(1, "https://example.com/always", vec![]).unwrap(),
            RedirectRule::new(
                2,
                "https://example.com/m",
                vec![RedirectCondition::device(DeviceType::Mobile)],
            )
            .unwrap(),
        ];
        let context = RequestContext::new().with_device(Some(DeviceType::Mobile));

        assert_eq!(
            resolve_destination(&rules, DEFAULT, &context),
            "https://example.com/always"
        );
    }

    #[test]
    fn test_concurrent_resolution_over_shared_rules() {
        use std::sync::Arc;
        use std::thread;

        let rules = Arc::new(scenario_rules());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let rules = Arc::clone(&rules);
                thread::spawn(move || {
                    let device = if i % 2 == 0 {
                        DeviceType::Mobile
                    } else {
                        DeviceType::Desktop
                    };
                    let context = RequestContext::new().with_device(Some(device));
                    resolve_destination(&rules, DEFAULT, &context).to_string()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let expected = if i % 2 == 0 {
                "https://example.com/m"
            } else {
                DEFAULT
            };
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
