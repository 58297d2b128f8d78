//! Loading and saving a short URL's redirect rule set.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::ShortUrlResolver;
use crate::domain::entities::{ShortUrl, ShortUrlIdentifier};
use crate::domain::redirect::RedirectRule;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Service managing redirect rules of existing short URLs.
pub struct RedirectRuleService {
    resolver: ShortUrlResolver,
    repository: Arc<dyn ShortUrlRepository>,
}

impl RedirectRuleService {
    /// Creates a new rule service.
    pub fn new(repository: Arc<dyn ShortUrlRepository>) -> Self {
        Self {
            resolver: ShortUrlResolver::new(repository.clone()),
            repository,
        }
    }

    /// Loads a short URL with its rules, enabled or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortUrlNotFound`] if nothing matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn load(&self, identifier: &ShortUrlIdentifier) -> Result<ShortUrl, AppError> {
        self.resolver.resolve_short_url(identifier).await
    }

    /// Re-reads a short URL by id, e.g. to show what a save stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the short URL no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn reload(&self, short_url_id: i64) -> Result<ShortUrl, AppError> {
        self.repository.find_by_id(short_url_id).await?.ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "short_url_id": short_url_id }))
        })
    }

    /// Replaces a short URL's rules.
    ///
    /// Rules are sorted by priority before saving; the sorted priorities must be
    /// exactly `1..=N`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if priorities are duplicated or not dense.
    /// Returns [`AppError::NotFound`] if the short URL no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn set_rules(
        &self,
        short_url: &ShortUrl,
        mut rules: Vec<RedirectRule>,
    ) -> Result<(), AppError> {
        rules.sort_by_key(RedirectRule::priority);

        for (index, rule) in rules.iter().enumerate() {
            let expected = index as u32 + 1;
            if rule.priority() != expected {
                return Err(AppError::bad_request(
                    "Rule priorities must be unique and dense starting at 1",
                    json!({ "expected": expected, "found": rule.priority() }),
                ));
            }
        }

        let count = rules.len();
        self.repository.save_rules(short_url.id, rules).await?;

        tracing::info!(
            "Saved {} redirect rules for {}",
            count,
            short_url.identifier()
        );
        Ok(())
    }
}
