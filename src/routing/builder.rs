//! Route table construction from configuration.
//!
//! # Responsibilities
//! - Turn each `[[routes]]` entry into a configured `Route`
//! - Register the `[not_found]` entry as the 404 catch-all
//! - Provide the static response action configured routes run
//!
//! # Design Decisions
//! - Routes are added in file order, so file order is match order
//! - The 404 route is added last; it is never pattern-matched anyway

use std::any::Any;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::config::schema::{ResponseConfig, RouterConfig};
use crate::error::RouterResult;
use crate::http::response::CONTENT_TYPE;
use crate::http::{ParamValue, Request, Response};
use crate::routing::method::Method;
use crate::routing::registry::RouteRegistry;
use crate::routing::route::{Action, ActionResult, Route};

/// Action writing a fixed response, or echoing the request as JSON.
#[derive(Debug, Clone)]
pub struct ResponseAction {
    response: ResponseConfig,
}

#[derive(Serialize)]
struct Echo<'a> {
    method: Method,
    path: &'a str,
    query: &'a BTreeMap<String, ParamValue>,
}

impl ResponseAction {
    pub fn new(response: ResponseConfig) -> Self {
        Self { response }
    }
}

impl Action for ResponseAction {
    fn invoke(&self, request: &mut Request, response: &mut Response, _extra: &[&dyn Any]) -> ActionResult {
        if let Some(status) = self.response.status {
            response.set_status(status);
        }
        for (name, value) in &self.response.headers {
            response.set_header(name.clone(), value.clone());
        }

        if self.response.echo {
            let body = serde_json::to_string(&Echo {
                method: request.method(),
                path: request.path(),
                query: request.query_all(),
            })?;
            response
                .set_header(CONTENT_TYPE, "application/json")
                .set_content(body);
        } else if let Some(body) = &self.response.body {
            response.add_content(body);
        }
        Ok(())
    }
}

/// Build a route registry from a validated configuration.
pub fn build_registry(config: &RouterConfig) -> RouterResult<RouteRegistry> {
    let mut registry = RouteRegistry::new();

    for entry in &config.routes {
        let method = Method::from_names(&entry.methods)?;
        let route = Route::new().configure(
            entry.pattern.clone(),
            method,
            ResponseAction::new(entry.response.clone()),
            entry.default,
        )?;
        registry.add(route)?;
    }

    if let Some(not_found) = &config.not_found {
        registry.add(Route::not_found(ResponseAction::new(not_found.clone())))?;
    }

    info!(routes = registry.len(), "Route table built from configuration");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;

    #[test]
    fn test_build_registry_in_file_order() {
        let config = parse_config(
            r#"
            [[routes]]
            pattern = "home"
            default = true

            [[routes]]
            pattern = "users/[:params:]"
            methods = ["GET", "POST"]

            [not_found]
            body = "nothing here"
            "#,
        )
        .unwrap();

        let registry = build_registry(&config).unwrap();
        let routes = registry.all();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].uri(), "home");
        assert!(routes[0].is_default());
        assert_eq!(routes[1].method(), Method::GET | Method::POST);
        assert!(routes[2].is_404());
    }

    #[test]
    fn test_build_registry_rejects_unknown_method() {
        let mut config = RouterConfig::default();
        config.routes.push(crate::config::schema::RouteConfig {
            pattern: "a".into(),
            methods: vec!["FETCH".into()],
            default: false,
            response: ResponseConfig::default(),
        });
        assert!(build_registry(&config).is_err());
    }

    #[test]
    fn test_static_response() {
        let action = ResponseAction::new(ResponseConfig {
            status: Some(201),
            body: Some("created".into()),
            headers: BTreeMap::from([("X-Route".to_string(), "users".to_string())]),
            ..ResponseConfig::default()
        });
        let mut request = Request::new(Method::POST, "users");
        let mut response = Response::new();
        action.invoke(&mut request, &mut response, &[]).unwrap();

        assert_eq!(response.status(), 201);
        assert_eq!(response.body(), "created");
        assert_eq!(response.header("X-Route"), Some("users"));
    }

    #[test]
    fn test_status_left_alone_when_unset() {
        let action = ResponseAction::new(ResponseConfig::default());
        let mut request = Request::new(Method::GET, "x");
        let mut response = Response::new();
        response.set_status(404);
        action.invoke(&mut request, &mut response, &[]).unwrap();
        assert_eq!(response.status(), 404);
    }

    #[test]
    fn test_echo_response() {
        let action = ResponseAction::new(ResponseConfig {
            echo: true,
            ..ResponseConfig::default()
        });
        let mut request = Request::parse(Method::GET, "/users/42?expand=1");
        let mut response = Response::new();
        action.invoke(&mut request, &mut response, &[]).unwrap();

        assert_eq!(response.header(CONTENT_TYPE), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["method"], "GET");
        assert_eq!(body["path"], "users/42");
        assert_eq!(body["query"]["expand"], "1");
    }
}
