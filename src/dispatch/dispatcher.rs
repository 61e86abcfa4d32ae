//! Request dispatcher.
//!
//! # Responsibilities
//! - Resolve (method, path) to a single route
//! - Merge extracted path parameters into the request
//! - Fire lifecycle hooks and honor their abort/override outcomes
//! - Invoke the resolved route's action
//!
//! # Dispatch Flow
//! ```text
//! Scanning ─┬─ Matched ────┐
//!           ├─ Overridden ─┼→ ParamsMerged → HookGated ─┬─ Invoked ─┬→ afterDispatch → Done
//!           ├─ FourOhFour ─┘                            └─ Skipped ─┘
//!           └─ Failed → RouteNotFound (no further hooks)
//! ```
//!
//! # Design Decisions
//! - First positional match in insertion order wins
//! - Each dispatch walks the registry with its own iterator and parameter
//!   buffer; nothing is carried over between calls
//! - The 404 route is remembered during the scan, never matched positionally

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, info_span};

use crate::config::schema::SegmentConfig;
use crate::dispatch::hooks::{DispatchGate, HookBus, HookEvent, NotFoundOverride};
use crate::error::{RouterError, RouterResult};
use crate::http::{Request, Response};
use crate::observability::metrics;
use crate::routing::method::Method;
use crate::routing::params::RouteParams;
use crate::routing::registry::RouteRegistry;
use crate::routing::route::Route;

/// How a route was resolved for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A route pattern matched the path.
    Matched,
    /// Empty path served by a default route.
    Default,
    /// Supplied by a `routeNotFound` hook.
    Overridden,
    /// Fell back to the 404 catch-all route.
    NotFound,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Matched => "matched",
            Resolution::Default => "default",
            Resolution::Overridden => "overridden",
            Resolution::NotFound => "not_found",
        }
    }
}

/// A route chosen for a request, with the parameters its pattern captured.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub route: Arc<Route>,
    pub resolution: Resolution,
    pub params: RouteParams,
}

/// Result of a successful dispatch.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub route: Arc<Route>,
    pub resolution: Resolution,
    pub params: RouteParams,
    /// False when a `beforeDispatch` hook aborted the action.
    pub invoked: bool,
}

/// Resolves requests against a route registry and runs the bound actions.
pub struct Dispatcher {
    routes: Arc<RouteRegistry>,
    hooks: Arc<dyn HookBus>,
    segments: Option<SegmentConfig>,
}

impl Dispatcher {
    /// Create a dispatcher and fire `router.dispatcher.afterInit`.
    pub fn new(routes: Arc<RouteRegistry>, hooks: Arc<dyn HookBus>) -> Self {
        let dispatcher = Self {
            routes,
            hooks,
            segments: None,
        };
        dispatcher.hooks.exec(&HookEvent::AfterInit);
        info!(routes = dispatcher.routes.len(), "Dispatcher initialized");
        dispatcher
    }

    /// Attach segment-based dispatch settings. Stored only; never evaluated.
    pub fn with_segments(mut self, segments: SegmentConfig) -> Self {
        debug!(segments = ?segments, "Segment dispatch configuration stored");
        self.segments = Some(segments);
        self
    }

    pub fn segments(&self) -> Option<&SegmentConfig> {
        self.segments.as_ref()
    }

    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    /// Dispatch a request to its route and run the route's action.
    ///
    /// `extra` is forwarded to the action untouched. On success the outcome
    /// reports how the route was resolved and whether the action ran.
    pub fn dispatch(
        &self,
        request: &mut Request,
        response: &mut Response,
        extra: &[&dyn Any],
    ) -> RouterResult<DispatchOutcome> {
        let started = Instant::now();
        let method = request.method();
        let path = request.path().trim_matches('/').to_string();

        let span = info_span!(
            "dispatch",
            request_id = %request.id(),
            method = %method,
            path = %path
        );
        let _enter = span.enter();

        info!("Trying to find a matching route");

        let Some(ResolvedRoute {
            route,
            resolution,
            params,
        }) = self.find_route(method, &path)
        else {
            error!("No Route found, and no 404 Route defined");
            metrics::record_dispatch("failed", "none", started);
            return Err(RouterError::RouteNotFound { method, path });
        };

        if resolution == Resolution::NotFound {
            response.set_status(404);
        }

        if !params.is_empty() {
            debug!(params = ?params, "Merging route parameters into request query");
            request.add_query(&params);
        }

        let gate = DispatchGate::from_outcomes(&self.hooks.exec(&HookEvent::BeforeDispatch(&route)));
        let result = match gate {
            DispatchGate::Continue => Self::invoke(&route, request, response, extra).map(|()| true),
            DispatchGate::Abort => {
                info!(uri = %route.uri(), "Route action skipped by beforeDispatch hook");
                Ok(false)
            }
        };

        self.hooks.exec(&HookEvent::AfterDispatch(&route));

        let invoked = match result {
            Ok(invoked) => invoked,
            Err(e) => {
                error!(uri = %route.uri(), error = %e, "Route action failed");
                metrics::record_dispatch(resolution.as_str(), "failed", started);
                return Err(e);
            }
        };

        metrics::record_dispatch(
            resolution.as_str(),
            if invoked { "invoked" } else { "skipped" },
            started,
        );

        Ok(DispatchOutcome {
            route,
            resolution,
            params,
            invoked,
        })
    }

    /// Resolve a normalized path to a route.
    ///
    /// Fires `routeFound` on a match and `routeNotFound` when the scan comes up
    /// empty. Returns `None` when there is no match, no hook override, and no
    /// 404 route.
    pub fn find_route(&self, method: Method, path: &str) -> Option<ResolvedRoute> {
        if path.is_empty() {
            if let Some(route) = self
                .routes
                .iter()
                .find(|r| r.is_default() && !r.is_404() && r.accepts(method))
            {
                self.hooks.exec(&HookEvent::RouteFound(route));
                info!(uri = %route.uri(), "Default route selected for empty path");
                return Some(ResolvedRoute {
                    route: Arc::clone(route),
                    resolution: Resolution::Default,
                    params: RouteParams::default(),
                });
            }
        }

        let mut fallback = None;
        for route in self.routes.iter() {
            if route.is_404() {
                fallback = Some(route);
                continue;
            }
            if !route.accepts(method) {
                continue;
            }
            let Some(params) = route.match_path(path) else {
                continue;
            };

            self.hooks.exec(&HookEvent::RouteFound(route));
            info!(uri = %route.uri(), "Route match found");
            return Some(ResolvedRoute {
                route: Arc::clone(route),
                resolution: Resolution::Matched,
                params,
            });
        }

        let outcomes = self.hooks.exec(&HookEvent::RouteNotFound { method, path });
        if let NotFoundOverride::Override(route) = NotFoundOverride::from_outcomes(outcomes) {
            info!(uri = %route.uri(), "Route supplied by routeNotFound hook");
            return Some(ResolvedRoute {
                route,
                resolution: Resolution::Overridden,
                params: RouteParams::default(),
            });
        }

        fallback.map(|route| {
            info!("No route matched, using 404 route");
            ResolvedRoute {
                route: Arc::clone(route),
                resolution: Resolution::NotFound,
                params: RouteParams::default(),
            }
        })
    }

    fn invoke(
        route: &Route,
        request: &mut Request,
        response: &mut Response,
        extra: &[&dyn Any],
    ) -> RouterResult<()> {
        let action = route
            .action()
            .ok_or_else(|| RouterError::RouteIncomplete("resolved route has no action".into()))?;
        info!(uri = %route.uri(), method = %route.method(), "Executing route definition");
        action
            .invoke(request, response, extra)
            .map_err(RouterError::Action)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("route_count", &self.routes.len())
            .field("segments", &self.segments)
            .finish()
    }
}
