//! HTTP request handlers.
//!
//! - [`redirect`] - Redirect middleware for `/{code}`
//! - [`not_found`] - JSON 404 fallback
//! - [`health`] - Service health check

pub mod health;
pub mod not_found;
pub mod redirect;

pub use health::health_handler;
pub use not_found::not_found_handler;
