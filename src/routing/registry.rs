//! Route storage and traversal.
//!
//! # Responsibilities
//! - Store routes in insertion order (first match wins)
//! - Reject incomplete routes on insert
//! - Provide cursor-based `next`/`prev` traversal and call-local iteration
//!
//! # Design Decisions
//! - The cursor needs `&mut self`; the borrow checker keeps two scans from
//!   interleaving on one registry
//! - The dispatcher never touches the cursor; it walks `iter()`, so a shared
//!   `Arc<RouteRegistry>` can serve concurrent dispatches
//! - Routes are stored as `Arc<Route>` so snapshots and overrides are cheap

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::{RouterError, RouterResult};
use crate::observability::metrics;
use crate::routing::route::Route;

/// Position of the traversal cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Cursor {
    /// Not positioned; the next `next()`/`prev()` starts from an end.
    #[default]
    Idle,
    At(usize),
}

/// Ordered collection of routes.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: Vec<Arc<Route>>,
    cursor: Cursor,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route after checking it is complete.
    pub fn add(&mut self, route: Route) -> RouterResult<&mut Self> {
        let missing = route.missing_parts();
        if !missing.is_empty() {
            error!(missing = ?missing, "Route is not complete and can not be stored");
            debug!(route = ?route, "Rejected route definition");
            return Err(RouterError::RouteIncomplete(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        info!(
            uri = %route.uri(),
            method = %route.method(),
            is_default = route.is_default(),
            is_404 = route.is_404(),
            "Route added to registry"
        );
        metrics::record_route_registered();
        self.routes.push(Arc::new(route));
        Ok(self)
    }

    /// Snapshot of every route in insertion order. Does not move the cursor.
    pub fn all(&self) -> Vec<Arc<Route>> {
        self.routes.clone()
    }

    /// Call-local traversal in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route>> + '_ {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Advance the cursor and return the route under it.
    ///
    /// The first call returns the first route. Returns `None` once past the
    /// end, after which the cursor is idle again.
    pub fn next(&mut self) -> Option<Arc<Route>> {
        let idx = match self.cursor {
            Cursor::Idle => 0,
            Cursor::At(i) => i + 1,
        };
        self.move_to(Some(idx))
    }

    /// Retreat the cursor and return the route under it.
    ///
    /// The first call returns the last route. Returns `None` once past the
    /// beginning, after which the cursor is idle again.
    pub fn prev(&mut self) -> Option<Arc<Route>> {
        let idx = match self.cursor {
            Cursor::Idle => self.routes.len().checked_sub(1),
            Cursor::At(i) => i.checked_sub(1),
        };
        self.move_to(idx)
    }

    /// Put the cursor back to its idle position.
    pub fn reset(&mut self) {
        self.cursor = Cursor::Idle;
    }

    fn move_to(&mut self, idx: Option<usize>) -> Option<Arc<Route>> {
        match idx.and_then(|i| self.routes.get(i).map(|r| (i, r))) {
            Some((i, route)) => {
                self.cursor = Cursor::At(i);
                Some(Arc::clone(route))
            }
            None => {
                self.cursor = Cursor::Idle;
                None
            }
        }
    }
}
