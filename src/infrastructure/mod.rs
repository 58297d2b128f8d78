//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application
//! layers.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`geolocation`] - Remote address geolocation backends
//! - [`terminal`] - Interactive terminal prompter for the admin CLI

pub mod geolocation;
pub mod persistence;
pub mod terminal;
