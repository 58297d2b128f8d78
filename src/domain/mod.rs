//! Domain layer containing business entities and logic.
//!
//! Nothing in this layer depends on infrastructure or presentation code.
//!
//! # Architecture
//!
//! - [`entities`] - Short URLs, identifiers and visits
//! - [`redirect`] - Redirect conditions, rules and the destination engine
//! - [`repositories`] - Data access trait definitions
//! - [`tracking`] - Visit tracking and geolocation contracts
//! - [`visit_worker`] - Asynchronous visit persistence
//!
//! # Visit Processing Flow
//!
//! 1. The redirect middleware resolves an enabled short URL
//! 2. A [`tracking::VisitTracker`] builds a [`entities::Visit`] and sends it to a channel
//! 3. [`visit_worker::run_visit_worker`] persists it with retry logic
//! 4. The visit counter feeds back into [`entities::ShortUrl::is_enabled`]

pub mod entities;
pub mod redirect;
pub mod repositories;
pub mod tracking;
pub mod visit_worker;
