//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using runtime SQLx
//! queries against an externally managed schema.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] - Short URL lookup and rule set replacement
//! - [`PgVisitRepository`] - Visit storage and visit counting

pub mod pg_short_url_repository;
pub mod pg_visit_repository;

pub use pg_short_url_repository::PgShortUrlRepository;
pub use pg_visit_repository::PgVisitRepository;
