//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry / dispatcher produce:
//!     → logging.rs (structured log events, one span per dispatch)
//!     → metrics.rs (route and dispatch counters, dispatch latency)
//! ```
//!
//! # Design Decisions
//! - Request ID recorded on the dispatch span
//! - Metrics are cheap (atomic increments behind the facade)

pub mod logging;
pub mod metrics;
