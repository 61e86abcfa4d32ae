//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Definition (at startup):
//!     pattern + method mask + action
//!     → route.rs (validate mask, compile pattern once)
//!     → registry.rs (reject incomplete routes, store in order)
//!
//!     RouterConfig / RouteCollection
//!     → builder.rs / collection.rs (same path, in bulk)
//!
//! Incoming path (normalized):
//!     → pattern.rs (anchored, placeholder-expanded regex)
//!     → Return: RouteParams or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled at configuration time, read-only afterwards
//! - Deterministic: same input always matches same route
//! - First match wins (insertion order)

pub mod builder;
pub mod collection;
pub mod method;
pub mod params;
pub mod pattern;
pub mod registry;
pub mod route;

pub use builder::{build_registry, ResponseAction};
pub use collection::{RouteCollection, RouteDefinition};
pub use method::{IntoMethod, Method};
pub use params::RouteParams;
pub use pattern::{CompiledPattern, NOT_FOUND_PATTERN};
pub use registry::RouteRegistry;
pub use route::{action_fn, Action, ActionFn, ActionResult, Route};
