//! Application layer coordinating the domain.
//!
//! Services consume repository and tracker traits and give HTTP handlers and
//! the admin CLI a narrow API.
//!
//! # Available Services
//!
//! - [`services::ShortUrlResolver`] - Identifier to short URL lookup
//! - [`services::TrackingRedirectAction`] - Full redirect decision for one request
//! - [`services::RequestTracker`] - Tracking policy and visit queueing
//! - [`services::RedirectRuleService`] - Rule set load and replace
//!
//! [`rule_management`] holds the interactive rule editing workflow.

pub mod rule_management;
pub mod services;
