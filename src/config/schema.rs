//! Configuration schema definitions.
//!
//! This module defines the route table file format. All types derive Serde
//! traits for deserialization from TOML.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [[routes]]
//! pattern = "users/[:params:]"
//! methods = ["GET", "POST"]
//! response = { status = 200, echo = true }
//!
//! [not_found]
//! status = 404
//! body = "Not Found"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Route definitions, evaluated in file order.
    pub routes: Vec<RouteConfig>,

    /// Response of the 404 catch-all route. No 404 route when absent.
    pub not_found: Option<ResponseConfig>,

    /// Segment-based controller dispatch settings (stored, not evaluated).
    pub segments: Option<SegmentConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate's targets (`trace`..`error`).
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// A single route entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// URI pattern, may use `[:params:]`, `[:named:]` and alternation.
    pub pattern: String,

    /// Method names (`GET`, `POST`, `PUT`, `DELETE`, `CLI`, `ANY`).
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,

    /// Serve this route for an empty request path.
    #[serde(default)]
    pub default: bool,

    /// What the route's action writes to the response.
    #[serde(default)]
    pub response: ResponseConfig,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

/// Static response produced by a configured route.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ResponseConfig {
    /// HTTP status code. Left untouched when absent (200, or 404 on the
    /// catch-all fallback).
    pub status: Option<u16>,

    /// Body text.
    pub body: Option<String>,

    /// Render the request (method, path, query) as a JSON body instead.
    pub echo: bool,

    /// Extra response headers.
    pub headers: BTreeMap<String, String>,
}

/// Segment-based controller dispatch settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SegmentConfig {
    /// Namespace controllers are resolved in.
    pub namespace: String,

    /// Controller method used when the URI names none.
    pub default_method: String,

    /// Arguments passed to controller constructors.
    pub constructor_params: Vec<String>,

    /// URI prefix stripped before segment matching.
    pub uri_prefix: String,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            default_method: "index".to_string(),
            constructor_params: Vec::new(),
            uri_prefix: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(config.routes.is_empty());
        assert!(config.not_found.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(SegmentConfig::default().default_method, "index");
    }

    #[test]
    fn test_route_defaults_from_toml() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[routes]]
            pattern = "home"
            "#,
        )
        .unwrap();
        let route = &config.routes[0];
        assert_eq!(route.methods, vec!["GET"]);
        assert!(!route.default);
        assert_eq!(route.response, ResponseConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config: RouterConfig = toml::from_str(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [[routes]]
            pattern = "users/[:params:]"
            methods = ["GET", "POST"]
            response = { status = 201, echo = true }

            [not_found]
            status = 404
            body = "Not Found"

            [segments]
            namespace = "App"
            uri_prefix = "api"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.routes[0].response.status, Some(201));
        assert!(config.routes[0].response.echo);
        assert_eq!(config.not_found.unwrap().body.as_deref(), Some("Not Found"));
        let segments = config.segments.unwrap();
        assert_eq!(segments.uri_prefix, "api");
        assert_eq!(segments.default_method, "index");
    }
}
