//! Grouped route definitions.
//!
//! A `RouteCollection` lists routes in one place (typically one per
//! application module) and registers them in a single call.

use std::sync::Arc;

use tracing::debug;

use crate::error::RouterResult;
use crate::routing::method::Method;
use crate::routing::registry::RouteRegistry;
use crate::routing::route::{Action, Route};

/// A route waiting to be registered.
#[derive(Clone)]
pub struct RouteDefinition {
    pub uri: String,
    /// Allowed methods; `GET` when unset.
    pub method: Option<Method>,
    pub action: Arc<dyn Action>,
}

impl RouteDefinition {
    pub fn new(uri: impl Into<String>, action: impl Action + 'static) -> Self {
        Self {
            uri: uri.into(),
            method: None,
            action: Arc::new(action),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }
}

impl std::fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("uri", &self.uri)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// A set of routes registered together.
pub trait RouteCollection {
    /// The routes this collection provides, in match order.
    fn define(&mut self) -> Vec<RouteDefinition>;

    /// Configure every defined route and add it to `registry`.
    ///
    /// Stops at the first route that fails to configure or register.
    fn register(&mut self, registry: &mut RouteRegistry) -> RouterResult<()> {
        let definitions = self.define();
        debug!(count = definitions.len(), "Registering route collection");

        for definition in definitions {
            let route = Route::build(
                definition.uri,
                definition.method.unwrap_or(Method::GET),
                definition.action,
            )?;
            registry.add(route)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;
    use crate::routing::route::action_fn;

    struct Pages;

    impl RouteCollection for Pages {
        fn define(&mut self) -> Vec<RouteDefinition> {
            vec![
                RouteDefinition::new("home", action_fn(|_, _, _| Ok(()))),
                RouteDefinition::new("contact", action_fn(|_, _, _| Ok(())))
                    .with_method(Method::GET | Method::POST),
            ]
        }
    }

    struct Broken;

    impl RouteCollection for Broken {
        fn define(&mut self) -> Vec<RouteDefinition> {
            vec![RouteDefinition::new("", action_fn(|_, _, _| Ok(())))]
        }
    }

    #[test]
    fn test_register_adds_in_order_with_get_default() {
        let mut registry = RouteRegistry::new();
        Pages.register(&mut registry).unwrap();

        let routes = registry.all();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].uri(), "home");
        assert_eq!(routes[0].method(), Method::GET);
        assert_eq!(routes[1].method(), Method::GET | Method::POST);
    }

    #[test]
    fn test_register_rejects_incomplete_definition() {
        let mut registry = RouteRegistry::new();
        let err = Broken.register(&mut registry).unwrap_err();
        assert!(matches!(err, RouterError::RouteIncomplete(_)));
        assert!(registry.is_empty());
    }
}
