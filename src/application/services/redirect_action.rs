//! Redirect orchestration: resolve, track, pick destination.

use std::sync::Arc;

use url::Url;

use crate::application::services::ShortUrlResolver;
use crate::domain::entities::{ShortUrl, ShortUrlIdentifier, VisitLocation, VisitRequest};
use crate::domain::redirect::{QueryParams, RequestContext};
use crate::domain::tracking::VisitTracker;
use crate::error::AppError;

/// Outcome of a successful redirect decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    /// Final URL for the `Location` header.
    pub location: String,
    /// Location of the tracked visit, when one was recorded and located.
    pub visit_location: Option<VisitLocation>,
}

/// Handles one redirect request end to end, minus HTTP framing.
///
/// # Flow
///
/// 1. Resolve the enabled short URL (failures surface as
///    [`AppError::ShortUrlNotFound`] so the caller can hand over to the next handler)
/// 2. Ask the tracker to record a visit (best effort, never fails)
/// 3. Pick the destination through the short URL's redirect rules
/// 4. Forward the request query when the short URL asks for it
pub struct TrackingRedirectAction {
    resolver: Arc<ShortUrlResolver>,
    tracker: Arc<dyn VisitTracker>,
    disable_track_param: Option<String>,
}

impl TrackingRedirectAction {
    /// Creates a new redirect action.
    ///
    /// `disable_track_param` is stripped from forwarded query strings.
    pub fn new(
        resolver: Arc<ShortUrlResolver>,
        tracker: Arc<dyn VisitTracker>,
        disable_track_param: Option<String>,
    ) -> Self {
        Self {
            resolver,
            tracker,
            disable_track_param,
        }
    }

    /// Runs the redirect pipeline for an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortUrlNotFound`] if no enabled short URL matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn handle(
        &self,
        identifier: &ShortUrlIdentifier,
        context: &RequestContext,
        visit_request: &VisitRequest,
    ) -> Result<Redirection, AppError> {
        let short_url = self.resolver.resolve_enabled_short_url(identifier).await?;

        let visit = self
            .tracker
            .track_if_applicable(&short_url, visit_request)
            .await;

        let destination = short_url.destination_for(context);
        let location = self.build_location(&short_url, destination, context.query());

        tracing::debug!(
            "Redirecting {} to {} ({} rules evaluated)",
            identifier,
            location,
            short_url.rules().len()
        );
        metrics::counter!("redirects_total").increment(1);

        Ok(Redirection {
            location,
            visit_location: visit.and_then(|visit| visit.location),
        })
    }

    /// Appends the forwarded query to the destination.
    ///
    /// Destinations that cannot be parsed are returned unchanged.
    fn build_location(&self, short_url: &ShortUrl, destination: &str, query: &QueryParams) -> String {
        if !short_url.forward_query {
            return destination.to_string();
        }

        let forwarded = match &self.disable_track_param {
            Some(param) => query.without(param),
            None => query.clone(),
        };
        if forwarded.is_empty() {
            return destination.to_string();
        }

        let Ok(mut url) = Url::parse(destination) else {
            return destination.to_string();
        };

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in forwarded.iter() {
                match value {
                    Some(value) => pairs.append_pair(name, value),
                    None => pairs.append_key_only(name),
                };
            }
        }

        url.to_string()
    }
}
