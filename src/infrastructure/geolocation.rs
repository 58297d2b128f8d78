//! Geolocation backends.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::domain::entities::VisitLocation;
use crate::domain::tracking::GeoLocator;

/// Locator used when no geolocation database is configured.
pub struct NullGeoLocator;

#[async_trait]
impl GeoLocator for NullGeoLocator {
    async fn locate(&self, _addr: IpAddr) -> Option<VisitLocation> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_locator_never_locates() {
        let locator = NullGeoLocator;
        assert!(locator.locate("8.8.8.8".parse().unwrap()).await.is_none());
    }
}
