//! Repository trait for short URL lookup and rule persistence.

use crate::domain::entities::{ShortUrl, ShortUrlIdentifier};
use crate::domain::redirect::RedirectRule;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short URLs and their redirect rules.
///
/// Returned [`ShortUrl`] values carry their full rule list, ordered by priority.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a short URL by exact `(short code, domain)` match.
    ///
    /// A domain-less identifier only matches domain-less records and a
    /// domain-qualified identifier only matches records on that domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_identifier(
        &self,
        identifier: &ShortUrlIdentifier,
    ) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a short URL by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortUrl>, AppError>;

    /// Replaces the whole rule set of a short URL.
    ///
    /// Implementations must apply the replacement atomically: readers observe
    /// either the previous list or the new one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the short URL does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save_rules(&self, short_url_id: i64, rules: Vec<RedirectRule>) -> Result<(), AppError>;

    /// Verifies the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
