//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_routes_registered_total` (counter): routes accepted by a registry
//! - `router_dispatch_total` (counter): dispatches by resolution and action result
//! - `router_dispatch_duration_seconds` (histogram): time spent in `dispatch`
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - The binary installs the Prometheus recorder on demand and renders it
//!   in-process (no HTTP listener)

use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const ROUTES_REGISTERED: &str = "router_routes_registered_total";
pub const DISPATCH_TOTAL: &str = "router_dispatch_total";
pub const DISPATCH_DURATION: &str = "router_dispatch_duration_seconds";

/// Install the Prometheus recorder as the global metrics recorder.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub fn record_route_registered() {
    ::metrics::counter!(ROUTES_REGISTERED).increment(1);
}

/// Record a finished dispatch.
///
/// `resolution` is `matched`, `default`, `overridden`, `not_found` or
/// `failed`; `action` is `invoked`, `skipped`, `failed` or `none`.
pub fn record_dispatch(resolution: &'static str, action: &'static str, started: Instant) {
    ::metrics::counter!(DISPATCH_TOTAL, "resolution" => resolution, "action" => action)
        .increment(1);
    ::metrics::histogram!(DISPATCH_DURATION, "resolution" => resolution)
        .record(started.elapsed().as_secs_f64());
}
