//! Route definitions.
//!
//! # Responsibilities
//! - Bind a URI pattern and method mask to an action
//! - Validate the method mask at configuration time
//! - Mark the default route and the 404 catch-all route
//!
//! # Design Decisions
//! - Pattern is compiled once in `configure`; the route is read-only afterwards
//! - A blank route (`Route::new`) is representable so the registry can
//!   reject incomplete definitions
//! - Actions are trait objects behind `Arc`, so routes clone cheaply

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{ActionError, RouterResult};
use crate::http::{Request, Response};
use crate::routing::method::{IntoMethod, Method};
use crate::routing::params::RouteParams;
use crate::routing::pattern::{CompiledPattern, NOT_FOUND_PATTERN};

/// Result of running a route action.
pub type ActionResult = Result<(), ActionError>;

/// The invocable bound to a route.
///
/// `extra` carries every argument passed to `dispatch` after the request and
/// response, forwarded positionally and unchanged.
pub trait Action: Send + Sync {
    fn invoke(&self, request: &mut Request, response: &mut Response, extra: &[&dyn Any]) -> ActionResult;
}

impl Action for Arc<dyn Action> {
    fn invoke(&self, request: &mut Request, response: &mut Response, extra: &[&dyn Any]) -> ActionResult {
        (**self).invoke(request, response, extra)
    }
}

/// Action backed by a closure. Created with [`action_fn`].
#[derive(Clone)]
pub struct ActionFn<F> {
    f: F,
}

impl<F> Action for ActionFn<F>
where
    F: Fn(&mut Request, &mut Response, &[&dyn Any]) -> ActionResult + Send + Sync,
{
    fn invoke(&self, request: &mut Request, response: &mut Response, extra: &[&dyn Any]) -> ActionResult {
        (self.f)(request, response, extra)
    }
}

impl<F> fmt::Debug for ActionFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionFn")
    }
}

/// Wrap a closure as an [`Action`].
///
/// ```rust,ignore
/// let hello = action_fn(|_req, res, _extra| {
///     res.set_content("hello");
///     Ok(())
/// });
/// ```
pub fn action_fn<F>(f: F) -> ActionFn<F>
where
    F: Fn(&mut Request, &mut Response, &[&dyn Any]) -> ActionResult + Send + Sync,
{
    ActionFn { f }
}

/// A single route definition.
#[derive(Clone, Default)]
pub struct Route {
    uri: String,
    pattern: Option<CompiledPattern>,
    method: Method,
    action: Option<Arc<dyn Action>>,
    is_default: bool,
    is_404: bool,
}

impl Route {
    /// A blank, unconfigured route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure pattern, method mask, action and default flag.
    ///
    /// Fails with `InvalidMethod` when the mask is zero or has unknown bits,
    /// and with `InvalidPattern` when the anchored pattern does not compile.
    /// The reserved `404RouteNotFound` pattern yields the 404 catch-all, as
    /// with [`Route::configure_404`].
    pub fn configure<M, A>(
        mut self,
        uri: impl Into<String>,
        method: M,
        action: A,
        is_default: bool,
    ) -> RouterResult<Self>
    where
        M: IntoMethod,
        A: Action + 'static,
    {
        let method = method.into_method()?;
        let uri = uri.into();
        if uri == NOT_FOUND_PATTERN {
            return Ok(self.configure_404(action));
        }
        let pattern = CompiledPattern::compile(&uri)?;

        self.uri = uri;
        self.pattern = Some(pattern);
        self.method = method;
        self.action = Some(Arc::new(action));
        self.is_default = is_default;
        self.is_404 = false;
        Ok(self)
    }

    /// Turn this route into the 404 catch-all.
    pub fn configure_404<A: Action + 'static>(mut self, action: A) -> Self {
        self.uri = NOT_FOUND_PATTERN.to_string();
        self.pattern = None;
        self.method = Method::ANY;
        self.action = Some(Arc::new(action));
        self.is_default = false;
        self.is_404 = true;
        self
    }

    /// Shorthand for a configured, non-default route.
    pub fn build<M, A>(uri: impl Into<String>, method: M, action: A) -> RouterResult<Self>
    where
        M: IntoMethod,
        A: Action + 'static,
    {
        Self::new().configure(uri, method, action, false)
    }

    /// Shorthand for a default route, matched on an empty path.
    pub fn default_route<M, A>(uri: impl Into<String>, method: M, action: A) -> RouterResult<Self>
    where
        M: IntoMethod,
        A: Action + 'static,
    {
        Self::new().configure(uri, method, action, true)
    }

    /// Shorthand for the 404 catch-all route.
    pub fn not_found<A: Action + 'static>(action: A) -> Self {
        Self::new().configure_404(action)
    }

    /// Raw pattern as configured.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Anchored pattern, if the route has been configured with one.
    pub fn anchored(&self) -> Option<&str> {
        self.pattern.as_ref().map(CompiledPattern::anchored)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn action(&self) -> Option<&Arc<dyn Action>> {
        self.action.as_ref()
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn is_404(&self) -> bool {
        self.is_404
    }

    /// True when `method` is among this route's allowed methods.
    pub fn accepts(&self, method: Method) -> bool {
        (self.method & method) == method
    }

    /// Match a normalized path. The 404 route never matches.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        if self.is_404 {
            return None;
        }
        self.pattern.as_ref()?.match_path(path)
    }

    /// Why this route cannot be stored, if it is incomplete.
    pub fn missing_parts(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.uri.is_empty() {
            missing.push("uri");
        }
        if self.method.is_empty() {
            missing.push("method");
        }
        if self.action.is_none() {
            missing.push("action");
        }
        missing
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("uri", &self.uri)
            .field("anchored", &self.anchored())
            .field("method", &self.method)
            .field("has_action", &self.action.is_some())
            .field("is_default", &self.is_default)
            .field("is_404", &self.is_404)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    fn noop() -> impl Action {
        action_fn(|_, _, _| Ok(()))
    }

    #[test]
    fn test_configure_stores_fields() {
        let route = Route::new()
            .configure("uri", Method::GET, noop(), false)
            .unwrap();
        assert_eq!(route.uri(), "uri");
        assert_eq!(route.anchored(), Some("^uri$"));
        assert_eq!(route.method(), Method::GET);
        assert!(route.action().is_some());
        assert!(!route.is_default());
        assert!(!route.is_404());
    }

    #[test]
    fn test_action_is_invocable() {
        let route = Route::build(
            "uri",
            Method::GET,
            action_fn(|_, res, _| {
                res.set_content("called");
                Ok(())
            }),
        )
        .unwrap();

        let mut req = Request::new(Method::GET, "uri");
        let mut res = Response::new();
        route
            .action()
            .unwrap()
            .invoke(&mut req, &mut res, &[])
            .unwrap();
        assert_eq!(res.body(), "called");
    }

    #[test]
    fn test_invalid_method() {
        let err = Route::new().configure("uri", 123u8, noop(), false).unwrap_err();
        assert!(matches!(err, RouterError::InvalidMethod(123)));

        let err = Route::new().configure("uri", 0u8, noop(), false).unwrap_err();
        assert!(matches!(err, RouterError::InvalidMethod(0)));

        let err = Route::new().configure("uri", "PATCH", noop(), false).unwrap_err();
        assert!(matches!(err, RouterError::UnknownMethod(_)));
    }

    #[test]
    fn test_multi_method_mask() {
        let route = Route::build("uri", Method::GET | Method::POST, noop()).unwrap();
        assert!(route.accepts(Method::GET));
        assert!(route.accepts(Method::POST));
        assert!(!route.accepts(Method::PUT));
        assert!(!route.accepts(Method::DELETE));
        assert!(!route.accepts(Method::CLI));
    }

    #[test]
    fn test_configure_404() {
        let route = Route::not_found(noop());
        assert!(route.is_404());
        assert_eq!(route.uri(), NOT_FOUND_PATTERN);
        assert_eq!(route.method(), Method::ANY);
        assert!(route.match_path(NOT_FOUND_PATTERN).is_none());
        assert!(route.missing_parts().is_empty());
    }

    #[test]
    fn test_reserved_pattern_becomes_404_route() {
        let route = Route::build(NOT_FOUND_PATTERN, Method::GET, noop()).unwrap();
        assert!(route.is_404());
        assert!(!route.is_default());
        assert_eq!(route.method(), Method::ANY);
        assert!(route.anchored().is_none());
        assert!(route.match_path(NOT_FOUND_PATTERN).is_none());

        // mask is still validated first
        let err = Route::new()
            .configure(NOT_FOUND_PATTERN, 0u8, noop(), false)
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidMethod(0)));
    }

    #[test]
    fn test_blank_route_is_incomplete() {
        let route = Route::new();
        assert_eq!(route.missing_parts(), vec!["uri", "method", "action"]);
        assert!(route.match_path("").is_none());
    }
}
