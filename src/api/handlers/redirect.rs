//! Short URL redirect middleware.

use axum::{
    extract::{ConnectInfo, Path, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::debug;

use crate::domain::entities::{ShortUrlIdentifier, VisitRequest};
use crate::domain::redirect::{QueryParams, RequestContext};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::accept_language::preferred_language;
use crate::utils::host::request_host;
use crate::utils::user_agent::parse_user_agent;

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Redirects a short code to the destination picked by its rules.
///
/// # Endpoint
///
/// `GET /{code}` (installed with `route_layer`)
///
/// # Request Flow
///
/// 1. Build the identifier from the path code and the `Host` header
///    (the configured default domain maps to "no domain")
/// 2. Derive device, language and query params from the request
/// 3. Run [`crate::application::services::TrackingRedirectAction`]
/// 4. Respond with the configured redirect status, `Location` and `Cache-Control`;
///    the visit location, when known, is added to the response extensions
///
/// # Fallback
///
/// When no enabled short URL matches, the request is passed unchanged to the
/// wrapped handler.
///
/// # Errors
///
/// Returns 500 Internal Server Error on database failures.
pub async fn layer(
    State(state): State<AppState>,
    Path(code): Path<String>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = req.headers();
    let host = request_host(headers);

    let identifier = match &host {
        Some(host) => ShortUrlIdentifier::from_host(&code, host, state.default_domain.as_deref()),
        None => ShortUrlIdentifier::new(&code, None),
    };

    let user_agent = header_str(headers, header::USER_AGENT);
    let agent = user_agent.map(parse_user_agent).unwrap_or_default();
    let language = header_str(headers, header::ACCEPT_LANGUAGE).and_then(preferred_language);
    let query = QueryParams::parse(req.uri().query().unwrap_or_default());

    let context = RequestContext::new()
        .with_device(agent.device)
        .with_language(language.as_deref())
        .with_query(query.clone());

    let visit_request = VisitRequest {
        remote_addr: req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip()),
        user_agent: user_agent.map(str::to_string),
        referer: header_str(headers, header::REFERER).map(str::to_string),
        visited_url: Some(format!(
            "{}{}",
            host.as_deref().unwrap_or_default(),
            req.uri()
        )),
        query,
        potential_bot: agent.is_bot,
    };

    let redirection = match state
        .redirect_action
        .handle(&identifier, &context, &visit_request)
        .await
    {
        Ok(redirection) => redirection,
        Err(e) if e.is_short_url_not_found() => {
            debug!("No enabled short URL for {}, passing to next handler", identifier);
            return Ok(next.run(req).await);
        }
        Err(e) => return Err(e),
    };

    let options = state.redirect_options;
    let mut response = (
        options.status,
        [
            (header::LOCATION, redirection.location),
            (header::CACHE_CONTROL, options.cache_control()),
        ],
    )
        .into_response();

    if let Some(location) = redirection.visit_location {
        response.extensions_mut().insert(location);
    }

    Ok(response)
}
