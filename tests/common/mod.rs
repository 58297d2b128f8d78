#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use link_router::application::services::{
    RequestTracker, ShortUrlResolver, TrackingOptions, TrackingRedirectAction,
};
use link_router::domain::entities::{ShortUrl, ShortUrlIdentifier, Visit, VisitLocation};
use link_router::domain::redirect::{DeviceType, RedirectCondition, RedirectRule};
use link_router::domain::repositories::ShortUrlRepository;
use link_router::domain::tracking::GeoLocator;
use link_router::error::AppError;
use link_router::infrastructure::geolocation::NullGeoLocator;
use link_router::routes::app_router;
use link_router::state::{AppState, RedirectOptions};
use serde_json::json;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower::Layer;

pub const MOBILE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
pub const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const BOT_UA: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

/// Short URL store backed by a vector.
#[derive(Default)]
pub struct InMemoryShortUrlRepository {
    short_urls: Mutex<Vec<ShortUrl>>,
}

impl InMemoryShortUrlRepository {
    pub fn with(short_urls: Vec<ShortUrl>) -> Self {
        Self {
            short_urls: Mutex::new(short_urls),
        }
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn find_by_identifier(
        &self,
        identifier: &ShortUrlIdentifier,
    ) -> Result<Option<ShortUrl>, AppError> {
        let short_urls = self.short_urls.lock().unwrap();
        Ok(short_urls
            .iter()
            .find(|short_url| short_url.identifier() == *identifier)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortUrl>, AppError> {
        let short_urls = self.short_urls.lock().unwrap();
        Ok(short_urls.iter().find(|short_url| short_url.id == id).cloned())
    }

    async fn save_rules(&self, short_url_id: i64, rules: Vec<RedirectRule>) -> Result<(), AppError> {
        let mut short_urls = self.short_urls.lock().unwrap();
        let short_url = short_urls
            .iter_mut()
            .find(|short_url| short_url.id == short_url_id)
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "short_url_id": short_url_id }))
            })?;

        *short_url = short_url.clone().with_rules(rules);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Locator returning the same location for every address.
pub struct FixedGeoLocator(pub VisitLocation);

#[async_trait]
impl GeoLocator for FixedGeoLocator {
    async fn locate(&self, _addr: IpAddr) -> Option<VisitLocation> {
        Some(self.0.clone())
    }
}

/// Knobs for [`create_test_state`].
#[derive(Clone)]
pub struct TestOptions {
    pub tracking: TrackingOptions,
    pub redirect: RedirectOptions,
    pub default_domain: Option<String>,
    pub geo_locator: Arc<dyn GeoLocator>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            tracking: TrackingOptions::default(),
            redirect: RedirectOptions::default(),
            default_domain: Some("localhost".to_string()),
            geo_locator: Arc::new(NullGeoLocator),
        }
    }
}

pub fn create_test_state(
    short_urls: Vec<ShortUrl>,
    options: TestOptions,
) -> (AppState, mpsc::Receiver<Visit>) {
    let (tx, rx) = mpsc::channel(100);

    let repository: Arc<dyn ShortUrlRepository> =
        Arc::new(InMemoryShortUrlRepository::with(short_urls));
    let tracker = Arc::new(RequestTracker::new(
        options.tracking.clone(),
        options.geo_locator.clone(),
        tx.clone(),
    ));
    let redirect_action = Arc::new(TrackingRedirectAction::new(
        Arc::new(ShortUrlResolver::new(repository.clone())),
        tracker,
        options.tracking.disable_track_param.clone(),
    ));

    let state = AppState::new(
        redirect_action,
        repository,
        options.redirect,
        options.default_domain,
        tx,
    );

    (state, rx)
}

/// The production router behind a fixed peer address.
pub fn test_router(state: AppState) -> Router {
    Router::new().fallback_service(MockConnectInfoLayer.layer(app_router(state)))
}

/// `abc123` with a mobile rule and a `ref` query rule.
pub fn scenario_short_url() -> ShortUrl {
    ShortUrl::new(1, "abc123", None, "https://example.com/default")
        .with_forward_query(false)
        .with_rules(vec![
            RedirectRule::new(
                1,
                "https://example.com/m",
                vec![RedirectCondition::device(DeviceType::Mobile)],
            )
            .unwrap(),
            RedirectRule::new(
                2,
                "https://example.com/ref",
                vec![RedirectCondition::query_param("ref", None)],
            )
            .unwrap(),
        ])
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
