//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Request (method, path)
//!     → dispatcher.rs (default route, ordered scan, 404 fallback)
//!     → hooks.rs (routeFound / routeNotFound / beforeDispatch / afterDispatch)
//!     → Action::invoke(request, response, extra)
//! ```
//!
//! # Design Decisions
//! - Hooks influence control flow only through their returned outcome
//! - The dispatcher holds no per-request state

pub mod dispatcher;
pub mod hooks;

pub use dispatcher::{DispatchOutcome, Dispatcher, Resolution, ResolvedRoute};
pub use hooks::{HookBus, HookEvent, HookOutcome, HookRegistry};
