//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → routing::builder (route table + 404 route)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a new registry
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogFormat, LoggingConfig, ResponseConfig, RouteConfig, RouterConfig, SegmentConfig};
pub use validation::{validate_config, ValidationError};
