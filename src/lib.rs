//! Route registry and request dispatcher.
//!
//! Routes bind a URI pattern and a method mask to an action. The dispatcher
//! resolves each request to exactly one route (a match, the default route,
//! a hook-supplied override, or the 404 route), merges extracted parameters
//! into the request, and runs the action between lifecycle hooks.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use dispatch::{DispatchOutcome, Dispatcher, HookBus, HookEvent, HookOutcome, HookRegistry, Resolution};
pub use error::{RouterError, RouterResult};
pub use http::{Request, Response};
pub use routing::{action_fn, Action, Method, Route, RouteParams, RouteRegistry};
