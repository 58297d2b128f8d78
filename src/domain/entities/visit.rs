//! Visit entity produced when a redirect is tracked.

use chrono::{DateTime, Utc};
use std::net::IpAddr;

use crate::domain::redirect::QueryParams;

/// Geolocation resolved for a visit's remote address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitLocation {
    /// ISO 3166-1 alpha-2 country code (e.g. "ES", "US").
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub city: Option<String>,
}

/// Request metadata handed to the tracker.
#[derive(Debug, Clone, Default)]
pub struct VisitRequest {
    pub remote_addr: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    /// Full URL the client requested, including the query string.
    pub visited_url: Option<String>,
    pub query: QueryParams,
    pub potential_bot: bool,
}

/// A tracked redirect.
///
/// Built by the tracker and persisted asynchronously by the visit worker; the
/// redirect pipeline only reads its location.
#[derive(Debug, Clone)]
pub struct Visit {
    pub short_url_id: i64,
    pub visited_at: DateTime<Utc>,
    pub remote_addr: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub visited_url: Option<String>,
    pub potential_bot: bool,
    pub location: Option<VisitLocation>,
}

impl Visit {
    /// Creates a visit for a short URL from the request metadata.
    pub fn new(short_url_id: i64, request: &VisitRequest, location: Option<VisitLocation>) -> Self {
        Self {
            short_url_id,
            visited_at: Utc::now(),
            remote_addr: request.remote_addr.map(|addr| addr.to_string()),
            user_agent: request.user_agent.clone(),
            referer: request.referer.clone(),
            visited_url: request.visited_url.clone(),
            potential_bot: request.potential_bot,
            location,
        }
    }
}
