use std::sync::Mutex;
use colored::*;

use crate::logging::log_info;

/// Views the client can be sent to from outside the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Team(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Team(id) => format!("/teams/{}", id),
        }
    }
}

/// Forced navigation. Implementations must tolerate repeated calls with the
/// same route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Tells the terminal user where to go next; prints each route once per
/// process.
#[derive(Default)]
pub struct TerminalNavigator {
    shown: Mutex<Vec<Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        log_info(&format!("Navigating to {}", route.path()));

        let Ok(mut shown) = self.shown.lock() else {
            return;
        };
        if shown.contains(&route) {
            return;
        }
        match &route {
            Route::Login => eprintln!(
                "{} {}",
                "⚠".yellow(),
                "Your session has ended. Run 'collab login' to sign in again.".yellow()
            ),
            Route::Team(id) => println!(
                "{}",
                format!("Run 'collab team show --team {}' to see it.", id).dimmed()
            ),
            Route::Dashboard => {}
        }
        shown.push(route);
    }
}

/// Keeps every navigation; used to assert redirects.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }
}
