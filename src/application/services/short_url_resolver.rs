//! Identifier to short URL resolution.

use std::sync::Arc;

use crate::domain::entities::{ShortUrl, ShortUrlIdentifier};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Resolves identifiers to short URL records.
///
/// Lookups are exact on `(short code, domain)`: there is no fallback from a
/// domain-qualified identifier to a domain-less record or the other way round.
pub struct ShortUrlResolver {
    repository: Arc<dyn ShortUrlRepository>,
}

impl ShortUrlResolver {
    /// Creates a new resolver.
    pub fn new(repository: Arc<dyn ShortUrlRepository>) -> Self {
        Self { repository }
    }

    /// Returns the matching record whether or not it is currently enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortUrlNotFound`] if nothing matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_short_url(
        &self,
        identifier: &ShortUrlIdentifier,
    ) -> Result<ShortUrl, AppError> {
        self.repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| AppError::short_url_not_found(identifier))
    }

    /// Returns the matching record only if it is eligible for redirection.
    ///
    /// Eligibility is the record's own [`ShortUrl::is_enabled`] check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortUrlNotFound`] if nothing matches or the match is disabled.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_enabled_short_url(
        &self,
        identifier: &ShortUrlIdentifier,
    ) -> Result<ShortUrl, AppError> {
        let short_url = self.resolve_short_url(identifier).await?;

        if !short_url.is_enabled() {
            tracing::debug!("Short URL {} exists but is disabled", identifier);
            return Err(AppError::short_url_not_found(identifier));
        }

        Ok(short_url)
    }
}
