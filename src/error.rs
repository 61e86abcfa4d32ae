//! Router error definitions.
//!
//! # Error Classes
//! - Configuration-time: `InvalidMethod`, `InvalidPattern`
//! - Integrity: `RouteIncomplete` (registry insertion)
//! - Per-request: `RouteNotFound`, `Action`
//!
//! None of these are retried or recovered inside the engine.

use thiserror::Error;

use crate::routing::method::Method;

/// Error returned by a route action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building routes or dispatching requests.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Method mask is zero or carries bits outside the known set.
    #[error("Invalid HTTP method mask: {0:#07b}")]
    InvalidMethod(u8),

    /// Unknown method name (e.g. from a config file or the CLI).
    #[error("Unknown HTTP method name '{0}'")]
    UnknownMethod(String),

    /// The anchored and expanded pattern is not a valid regular expression.
    #[error("Route pattern '{pattern}' does not compile: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Route is missing its pattern, method, or action.
    #[error("Retrieved Route is not complete and can not be stored: {0}")]
    RouteIncomplete(String),

    /// No positional match, no hook override, and no 404 route.
    #[error("No Route definition found for Request URI '{path}' with HTTP Method '{method}'")]
    RouteNotFound { method: Method, path: String },

    /// The matched route's action failed.
    #[error("Route action failed: {0}")]
    Action(#[source] ActionError),
}

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::RouteNotFound {
            method: Method::POST,
            path: "missing/route".into(),
        };
        assert_eq!(
            err.to_string(),
            "No Route definition found for Request URI 'missing/route' with HTTP Method 'POST'"
        );

        let err = RouterError::InvalidMethod(0b100000);
        assert!(err.to_string().contains("0b100000"));
    }

    #[test]
    fn test_action_error_source() {
        let inner: ActionError = "boom".into();
        let err = RouterError::Action(inner);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Route action failed: boom");
    }
}
