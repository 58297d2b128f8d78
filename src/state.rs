//! Shared application state for Axum handlers.

use axum::http::StatusCode;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::TrackingRedirectAction;
use crate::domain::entities::Visit;
use crate::domain::repositories::ShortUrlRepository;

/// How redirect responses are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectOptions {
    /// One of 301, 302, 307 or 308.
    pub status: StatusCode,
    /// `max-age` sent with permanent redirects.
    pub cache_lifetime: u64,
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self {
            status: StatusCode::FOUND,
            cache_lifetime: 30,
        }
    }
}

impl RedirectOptions {
    pub fn is_permanent(&self) -> bool {
        matches!(
            self.status,
            StatusCode::MOVED_PERMANENTLY | StatusCode::PERMANENT_REDIRECT
        )
    }

    /// `Cache-Control` value for redirect responses.
    pub fn cache_control(&self) -> String {
        if self.is_permanent() {
            format!("private, max-age={}", self.cache_lifetime)
        } else {
            "private, max-age=0".to_string()
        }
    }
}

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap: every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub redirect_action: Arc<TrackingRedirectAction>,
    pub short_urls: Arc<dyn ShortUrlRepository>,
    pub redirect_options: RedirectOptions,
    /// Host treated as "no domain" when building identifiers.
    pub default_domain: Option<String>,
    pub visit_sender: mpsc::Sender<Visit>,
}

impl AppState {
    pub fn new(
        redirect_action: Arc<TrackingRedirectAction>,
        short_urls: Arc<dyn ShortUrlRepository>,
        redirect_options: RedirectOptions,
        default_domain: Option<String>,
        visit_sender: mpsc::Sender<Visit>,
    ) -> Self {
        Self {
            redirect_action,
            short_urls,
            redirect_options,
            default_domain,
            visit_sender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_control_for_permanent_redirects() {
        let options = RedirectOptions {
            status: StatusCode::PERMANENT_REDIRECT,
            cache_lifetime: 120,
        };

        assert!(options.is_permanent());
        assert_eq!(options.cache_control(), "private, max-age=120");
    }

    #[test]
    fn test_cache_control_for_temporary_redirects() {
        let options = RedirectOptions {
            status: StatusCode::TEMPORARY_REDIRECT,
            cache_lifetime: 120,
        };

        assert!(!options.is_permanent());
        assert_eq!(options.cache_control(), "private, max-age=0");
    }
}
