//! Repository trait definitions for the domain layer.
//!
//! Traits define the persistence contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ShortUrlRepository`] - Short URL lookup and rule replacement
//! - [`VisitRepository`] - Visit recording

pub mod short_url_repository;
pub mod visit_repository;

pub use short_url_repository::ShortUrlRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
