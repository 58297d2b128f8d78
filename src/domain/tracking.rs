//! Contracts for visit tracking and geolocation.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::domain::entities::{ShortUrl, Visit, VisitLocation, VisitRequest};

/// Records a redirect as a visit when tracking policy allows it.
///
/// Implementations never fail from the caller's point of view: internal errors
/// are logged and reported as `None` so the redirect always proceeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitTracker: Send + Sync {
    async fn track_if_applicable(&self, short_url: &ShortUrl, request: &VisitRequest)
    -> Option<Visit>;
}

/// Resolves a remote address to a location.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self, addr: IpAddr) -> Option<VisitLocation>;
}
