mod common;

use axum_test::TestServer;
use common::{InMemoryShortUrlRepository, MOBILE_UA, TestOptions};
use link_router::application::rule_management::{insert_rule, move_rule, remove_rule};
use link_router::application::services::RedirectRuleService;
use link_router::domain::entities::ShortUrlIdentifier;
use link_router::domain::redirect::{RedirectCondition, RedirectRule};
use std::sync::Arc;

#[tokio::test]
async fn test_saved_rules_replace_stored_set() {
    let repository = Arc::new(InMemoryShortUrlRepository::with(vec![
        common::scenario_short_url(),
    ]));
    let service = RedirectRuleService::new(repository);
    let identifier = ShortUrlIdentifier::new("abc123", None);

    let short_url = service.load(&identifier).await.unwrap();
    let moved = move_rule(short_url.rules(), 1, 1);
    service.set_rules(&short_url, moved).await.unwrap();

    let reloaded = service.load(&identifier).await.unwrap();
    assert_eq!(reloaded.rules()[0].long_url(), "https://example.com/ref");
    assert_eq!(reloaded.rules()[1].long_url(), "https://example.com/m");
}

#[tokio::test]
async fn test_removing_only_rule_restores_default_target() {
    let short_url = common::scenario_short_url();
    let (state, _rx) = common::create_test_state(vec![short_url.clone()], TestOptions::default());
    let service = RedirectRuleService::new(state.short_urls.clone());
    let server = TestServer::new(common::test_router(state)).unwrap();

    let without_query_rule = remove_rule(short_url.rules(), 1);
    service.set_rules(&short_url, without_query_rule).await.unwrap();

    let mobile = server
        .get("/abc123?ref=x")
        .add_header("User-Agent", MOBILE_UA)
        .await;
    assert_eq!(mobile.header("location"), "https://example.com/m");

    let short_url = service
        .load(&ShortUrlIdentifier::new("abc123", None))
        .await
        .unwrap();
    service
        .set_rules(&short_url, remove_rule(short_url.rules(), 0))
        .await
        .unwrap();

    let mobile = server
        .get("/abc123?ref=x")
        .add_header("User-Agent", MOBILE_UA)
        .await;
    assert_eq!(mobile.header("location"), "https://example.com/default");
}

#[tokio::test]
async fn test_inserted_rule_takes_precedence() {
    let short_url = common::scenario_short_url();
    let (state, _rx) = common::create_test_state(vec![short_url.clone()], TestOptions::default());
    let service = RedirectRuleService::new(state.short_urls.clone());
    let server = TestServer::new(common::test_router(state)).unwrap();

    let campaign = RedirectRule::new(
        1,
        "https://example.com/campaign",
        vec![RedirectCondition::query_param("utm_campaign", Some("spring"))],
    )
    .unwrap();
    service
        .set_rules(&short_url, insert_rule(short_url.rules(), campaign))
        .await
        .unwrap();

    let response = server
        .get("/abc123?utm_campaign=spring")
        .add_header("User-Agent", MOBILE_UA)
        .await;

    assert_eq!(response.header("location"), "https://example.com/campaign");
}

#[tokio::test]
async fn test_rules_with_gaps_are_rejected() {
    let short_url = common::scenario_short_url();
    let repository = Arc::new(InMemoryShortUrlRepository::with(vec![short_url.clone()]));
    let service = RedirectRuleService::new(repository);

    let rules = vec![
        RedirectRule::new(1, "https://example.com/a", vec![]).unwrap(),
        RedirectRule::new(3, "https://example.com/b", vec![]).unwrap(),
    ];

    let result = service.set_rules(&short_url, rules).await;

    assert!(result.is_err());
    let stored = service
        .load(&ShortUrlIdentifier::new("abc123", None))
        .await
        .unwrap();
    assert_eq!(stored.rules().len(), 2);
    assert_eq!(stored.rules()[1].long_url(), "https://example.com/ref");
}

#[tokio::test]
async fn test_reload_after_save_returns_stored_rules() {
    let short_url = common::scenario_short_url();
    let repository = Arc::new(InMemoryShortUrlRepository::with(vec![short_url.clone()]));
    let service = RedirectRuleService::new(repository);

    service
        .set_rules(&short_url, remove_rule(short_url.rules(), 0))
        .await
        .unwrap();

    let reloaded = service.reload(short_url.id).await.unwrap();
    assert_eq!(reloaded.rules().len(), 1);
    assert_eq!(reloaded.rules()[0].priority(), 1);
    assert_eq!(reloaded.rules()[0].long_url(), "https://example.com/ref");

    assert!(service.reload(999).await.is_err());
}
