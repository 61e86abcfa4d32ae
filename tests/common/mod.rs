//! Shared utilities for integration tests.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use route_dispatcher::dispatch::hooks::{HookBus, HookEvent, HookOutcome};
use route_dispatcher::routing::ActionResult;
use route_dispatcher::{action_fn, Action, Request, Response, Route};

/// Hook bus that records every event it sees.
///
/// Optionally aborts `beforeDispatch` or answers `routeNotFound` with a route.
#[derive(Default)]
pub struct RecordingHooks {
    events: Mutex<Vec<&'static str>>,
    abort_dispatch: bool,
    not_found_route: Option<Arc<Route>>,
}

#[allow(dead_code)]
impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aborting() -> Self {
        Self {
            abort_dispatch: true,
            ..Self::default()
        }
    }

    pub fn overriding(route: Route) -> Self {
        Self {
            not_found_route: Some(Arc::new(route)),
            ..Self::default()
        }
    }

    /// Hook names in the order they fired.
    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| **e == name).count()
    }
}

impl HookBus for RecordingHooks {
    fn exec(&self, event: &HookEvent<'_>) -> Vec<HookOutcome> {
        self.events.lock().unwrap().push(event.name());
        match event {
            HookEvent::BeforeDispatch(_) if self.abort_dispatch => vec![HookOutcome::Abort],
            HookEvent::RouteNotFound { .. } => match &self.not_found_route {
                Some(route) => vec![HookOutcome::Continue, HookOutcome::Override(Arc::clone(route))],
                None => vec![HookOutcome::Continue],
            },
            _ => vec![HookOutcome::Continue],
        }
    }
}

/// Action that writes `tag` as the response body.
#[allow(dead_code)]
pub fn tagged(tag: &'static str) -> impl Action {
    action_fn(move |_: &mut Request, res: &mut Response, _: &[&dyn Any]| -> ActionResult {
        res.set_content(tag);
        Ok(())
    })
}

/// Action that bumps `counter` every time it runs.
#[allow(dead_code)]
pub fn counting(counter: &Arc<AtomicUsize>) -> impl Action {
    let counter = Arc::clone(counter);
    action_fn(move |_: &mut Request, _: &mut Response, _: &[&dyn Any]| -> ActionResult {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}
