//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check method names, patterns and status codes of every route
//! - Check the logging level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before the route table is built

use thiserror::Error;

use crate::config::schema::{ResponseConfig, RouterConfig};
use crate::routing::method::Method;
use crate::routing::pattern::{CompiledPattern, NOT_FOUND_PATTERN};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routes[{index}]: pattern must not be empty")]
    EmptyPattern { index: usize },

    #[error("routes[{index}]: pattern '{NOT_FOUND_PATTERN}' is reserved for the 404 route")]
    ReservedPattern { index: usize },

    #[error("routes[{index}]: pattern does not compile: {reason}")]
    InvalidPattern { index: usize, reason: String },

    #[error("routes[{index}]: at least one method is required")]
    NoMethods { index: usize },

    #[error("routes[{index}]: unknown method '{method}'")]
    UnknownMethod { index: usize, method: String },

    #[error("{location}: status {status} is not a valid HTTP status")]
    InvalidStatus { location: String, status: u16 },

    #[error("logging: invalid level '{0}', expected one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    for (index, route) in config.routes.iter().enumerate() {
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
        } else if route.pattern == NOT_FOUND_PATTERN {
            errors.push(ValidationError::ReservedPattern { index });
        } else if let Err(e) = CompiledPattern::compile(&route.pattern) {
            errors.push(ValidationError::InvalidPattern {
                index,
                reason: e.to_string(),
            });
        }

        if route.methods.is_empty() {
            errors.push(ValidationError::NoMethods { index });
        }
        for method in &route.methods {
            if Method::from_name(method).is_err() {
                errors.push(ValidationError::UnknownMethod {
                    index,
                    method: method.clone(),
                });
            }
        }

        validate_response(&route.response, format!("routes[{index}]"), &mut errors);
    }

    if let Some(not_found) = &config.not_found {
        validate_response(not_found, "not_found".to_string(), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_response(response: &ResponseConfig, location: String, errors: &mut Vec<ValidationError>) {
    if let Some(status) = response.status {
        if !(100..=599).contains(&status) {
            errors.push(ValidationError::InvalidStatus { location, status });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(pattern: &str, methods: &[&str]) -> RouteConfig {
        RouteConfig {
            pattern: pattern.to_string(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
            default: false,
            response: ResponseConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = RouterConfig::default();
        config.routes.push(route("users/[:params:]", &["GET", "post", "ANY"]));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.logging.level = "loud".into();
        config.routes.push(route("", &["GET"]));
        config.routes.push(route("ok", &["PATCH"]));
        config.routes.push(route("404RouteNotFound", &[]));
        config.routes.push(route("broken(", &["GET"]));
        config.not_found = Some(ResponseConfig {
            status: Some(42),
            ..ResponseConfig::default()
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors[0], ValidationError::InvalidLogLevel("loud".into()));
        assert_eq!(errors[1], ValidationError::EmptyPattern { index: 0 });
        assert_eq!(
            errors[2],
            ValidationError::UnknownMethod {
                index: 1,
                method: "PATCH".into()
            }
        );
        assert_eq!(errors[3], ValidationError::ReservedPattern { index: 2 });
        assert_eq!(errors[4], ValidationError::NoMethods { index: 2 });
        assert!(matches!(errors[5], ValidationError::InvalidPattern { index: 3, .. }));
        assert_eq!(
            errors[6],
            ValidationError::InvalidStatus {
                location: "not_found".into(),
                status: 42
            }
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::UnknownMethod {
            index: 2,
            method: "PATCH".into(),
        };
        assert_eq!(err.to_string(), "routes[2]: unknown method 'PATCH'");
    }
}
