//! HTTP layer translating requests into application operations.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - Redirect middleware, fallback and health handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
