//! Helpers for URL validation and request attribute derivation.
//!
//! - [`long_url`] - Long URL validation shared by short URLs and rules
//! - [`host`] - Host extraction from HTTP headers
//! - [`user_agent`] - Device class and bot detection
//! - [`accept_language`] - Preferred language negotiation

pub mod accept_language;
pub mod host;
pub mod long_url;
pub mod user_agent;
