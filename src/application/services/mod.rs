//! Services orchestrating domain operations.

pub mod redirect_action;
pub mod redirect_rule_service;
pub mod request_tracker;
pub mod short_url_resolver;

pub use redirect_action::{Redirection, TrackingRedirectAction};
pub use redirect_rule_service::RedirectRuleService;
pub use request_tracker::{RequestTracker, TrackingOptions};
pub use short_url_resolver::ShortUrlResolver;
