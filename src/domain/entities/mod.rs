//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShortUrl`] - A short link with its default target and redirect rules
//! - [`ShortUrlIdentifier`] - The `(short code, domain)` lookup key
//! - [`Visit`] - A tracked redirect, with optional [`VisitLocation`]

pub mod short_url;
pub mod visit;

pub use short_url::{ShortUrl, ShortUrlIdentifier};
pub use visit::{Visit, VisitLocation, VisitRequest};
