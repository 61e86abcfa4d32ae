//! Dispatcher lifecycle hooks.
//!
//! # Hook Points
//! - `router.dispatcher.afterInit`: once, when the dispatcher is built
//! - `router.dispatcher.routeFound`: a route matched (return ignored)
//! - `router.dispatcher.routeNotFound`: nothing matched; may return an override
//! - `router.dispatcher.beforeDispatch`: may abort the action
//! - `router.dispatcher.afterDispatch`: always fires once a route was resolved
//!
//! # Design Decisions
//! - Handlers return a tagged [`HookOutcome`] instead of a loosely typed value
//! - The bus returns every handler's outcome; each hook site aggregates them
//! - Only an explicit `Abort` blocks the action; anything else continues

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::routing::method::Method;
use crate::routing::route::Route;

pub const AFTER_INIT: &str = "router.dispatcher.afterInit";
pub const ROUTE_FOUND: &str = "router.dispatcher.routeFound";
pub const ROUTE_NOT_FOUND: &str = "router.dispatcher.routeNotFound";
pub const BEFORE_DISPATCH: &str = "router.dispatcher.beforeDispatch";
pub const AFTER_DISPATCH: &str = "router.dispatcher.afterDispatch";

/// Arguments passed to hook handlers.
#[derive(Debug, Clone, Copy)]
pub enum HookEvent<'a> {
    AfterInit,
    RouteFound(&'a Route),
    RouteNotFound { method: Method, path: &'a str },
    BeforeDispatch(&'a Route),
    AfterDispatch(&'a Route),
}

impl HookEvent<'_> {
    /// Hook name this event is fired under.
    pub fn name(&self) -> &'static str {
        match self {
            HookEvent::AfterInit => AFTER_INIT,
            HookEvent::RouteFound(_) => ROUTE_FOUND,
            HookEvent::RouteNotFound { .. } => ROUTE_NOT_FOUND,
            HookEvent::BeforeDispatch(_) => BEFORE_DISPATCH,
            HookEvent::AfterDispatch(_) => AFTER_DISPATCH,
        }
    }

    /// The route carried by this event, if any.
    pub fn route(&self) -> Option<&Route> {
        match self {
            HookEvent::RouteFound(r) | HookEvent::BeforeDispatch(r) | HookEvent::AfterDispatch(r) => {
                Some(*r)
            }
            HookEvent::AfterInit | HookEvent::RouteNotFound { .. } => None,
        }
    }
}

/// What a single hook handler asks the dispatcher to do.
#[derive(Debug, Clone, Default)]
pub enum HookOutcome {
    /// No opinion.
    #[default]
    Continue,
    /// Skip the route action (`beforeDispatch` only).
    Abort,
    /// Use this route instead of failing (`routeNotFound` only).
    Override(Arc<Route>),
}

/// Aggregated `beforeDispatch` decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchGate {
    Continue,
    Abort,
}

impl DispatchGate {
    /// Abort if any handler aborted.
    pub fn from_outcomes(outcomes: &[HookOutcome]) -> Self {
        if outcomes.iter().any(|o| matches!(o, HookOutcome::Abort)) {
            DispatchGate::Abort
        } else {
            DispatchGate::Continue
        }
    }
}

/// Aggregated `routeNotFound` decision.
#[derive(Debug, Clone)]
pub enum NotFoundOverride {
    NoOverride,
    Override(Arc<Route>),
}

impl NotFoundOverride {
    /// The first overriding route wins.
    pub fn from_outcomes(outcomes: Vec<HookOutcome>) -> Self {
        outcomes
            .into_iter()
            .find_map(|o| match o {
                HookOutcome::Override(route) => Some(NotFoundOverride::Override(route)),
                _ => None,
            })
            .unwrap_or(NotFoundOverride::NoOverride)
    }
}

/// A hook bus the dispatcher fires lifecycle events on.
pub trait HookBus: Send + Sync {
    /// Run every handler registered for `event.name()` and collect outcomes.
    fn exec(&self, event: &HookEvent<'_>) -> Vec<HookOutcome>;
}

type HookHandler = Box<dyn Fn(&HookEvent<'_>) -> HookOutcome + Send + Sync>;

/// Name-keyed hook handler registry.
#[derive(Default)]
pub struct HookRegistry {
    handlers: HashMap<String, Vec<HookHandler>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a hook name. Handlers run in registration order.
    pub fn on<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HookEvent<'_>) -> HookOutcome + Send + Sync + 'static,
    {
        self.handlers
            .entry(name.into())
            .or_default()
            .push(Box::new(handler));
        self
    }
}

impl HookBus for HookRegistry {
    fn exec(&self, event: &HookEvent<'_>) -> Vec<HookOutcome> {
        self.handlers
            .get(event.name())
            .map(|handlers| handlers.iter().map(|h| h(event)).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(name, handlers)| (name.as_str(), handlers.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("HookRegistry").field("handlers", &counts).finish()
    }
}
