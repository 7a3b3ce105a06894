//! Navigation seam for the view controllers.
//!
//! Controllers request route changes through `NavigatorTrait` instead of
//! touching the host environment directly, so tests can observe where a
//! controller tried to go.

use std::sync::Mutex;

use crate::types::route::Route;

/// Trait defining navigation between application routes.
pub trait NavigatorTrait {
    fn navigate(&self, route: Route);
}

/// Navigator that records route pushes in order.
///
/// Serves as the router for the demo binary and as the observation point in
/// controller tests.
pub struct RouteRecorder {
    routes: Mutex<Vec<Route>>,
}

impl RouteRecorder {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
        }
    }

    /// The most recently pushed route, if any.
    pub fn last(&self) -> Option<Route> {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .copied()
    }

    /// All pushed routes in order.
    pub fn history(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for RouteRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigatorTrait for RouteRecorder {
    fn navigate(&self, route: Route) {
        log::debug!("navigate -> {}", route.path());
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route);
    }
}
