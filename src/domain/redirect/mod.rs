//! Conditional redirect rules.
//!
//! - [`condition`] - Atomic predicates over device, language and query params
//! - [`rule`] - Prioritized rule ANDing its conditions
//! - [`engine`] - First-match destination selection
//! - [`context`] - Request attributes the conditions read
//!
//! Everything here is pure: no I/O, no shared mutable state.

pub mod condition;
pub mod context;
pub mod engine;
pub mod rule;

pub use condition::{DeviceType, RedirectCondition};
pub use context::{QueryParams, RequestContext};
pub use engine::resolve_destination;
pub use rule::RedirectRule;
