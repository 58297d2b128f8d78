//! Visit tracking policy and hand-off to the visit worker.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::entities::{ShortUrl, Visit, VisitRequest};
use crate::domain::tracking::{GeoLocator, VisitTracker};

/// Tracking switches read from configuration.
#[derive(Debug, Clone, Default)]
pub struct TrackingOptions {
    /// Disables tracking for every request.
    pub disabled: bool,
    /// Query param that opts a single request out of tracking.
    pub disable_track_param: Option<String>,
    /// Whether requests flagged as potential bots are tracked.
    pub track_bots: bool,
}

/// [`VisitTracker`] that queues visits for the background worker.
///
/// Visits are located synchronously (so the redirect can expose the location)
/// and then pushed onto a bounded channel. A full or closed channel drops the
/// visit with a warning and yields `None`. The redirect never waits on persistence.
pub struct RequestTracker {
    options: TrackingOptions,
    geo_locator: Arc<dyn GeoLocator>,
    sender: mpsc::Sender<Visit>,
}

impl RequestTracker {
    /// Creates a tracker that sends visits through `sender`.
    pub fn new(
        options: TrackingOptions,
        geo_locator: Arc<dyn GeoLocator>,
        sender: mpsc::Sender<Visit>,
    ) -> Self {
        Self {
            options,
            geo_locator,
            sender,
        }
    }

    fn should_track(&self, request: &VisitRequest) -> bool {
        if self.options.disabled {
            return false;
        }

        if let Some(param) = &self.options.disable_track_param
            && request.query.contains(param)
        {
            return false;
        }

        !request.potential_bot || self.options.track_bots
    }
}

#[async_trait]
impl VisitTracker for RequestTracker {
    async fn track_if_applicable(
        &self,
        short_url: &ShortUrl,
        request: &VisitRequest,
    ) -> Option<Visit> {
        if !self.should_track(request) {
            tracing::debug!("Skipping visit tracking for {}", short_url.identifier());
            return None;
        }

        let location = match request.remote_addr {
            Some(addr) => self.geo_locator.locate(addr).await,
            None => None,
        };
        let visit = Visit::new(short_url.id, request, location);

        match self.sender.try_send(visit.clone()) {
            Ok(()) => {
                metrics::counter!("visits_queued_total").increment(1);
                Some(visit)
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    "Visit queue is full, dropping visit for {}",
                    short_url.identifier()
                );
                metrics::counter!("visits_dropped_total").increment(1);
                None
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!(
                    "Visit queue is closed, dropping visit for {}",
                    short_url.identifier()
                );
                metrics::counter!("visits_dropped_total").increment(1);
                None
            }
        }
    }
}
