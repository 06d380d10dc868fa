//! Navigation guard: allow, redirect, or report not-found per attempt.
//!
//! The guard owns the current location and consults the route table plus
//! the session store on every navigation request. It decides; the host
//! view layer renders whatever was decided.

use std::sync::{Arc, Mutex};

use crate::routes::{RouteParams, RouteTable, ViewId};
use crate::session::SessionStore;

/// Where the client currently is.
#[derive(Debug, Clone)]
pub struct Location {
    pub view: ViewId,
    pub params: RouteParams,
    pub path: String,
}

impl Location {
    fn login() -> Self {
        Self {
            view: ViewId::Login,
            params: RouteParams::new(),
            path: "/login".to_string(),
        }
    }
}

/// The single outcome of one navigation attempt.
#[derive(Debug, Clone)]
pub enum NavOutcome {
    /// The target view may mount.
    Allowed(Location),
    /// The target required an authorized session and none was present.
    /// The original target is discarded, not queued.
    RedirectedToLogin { from: String },
    /// No route entry matches the path; the caller decides the fallback.
    NotFound { path: String },
}

/// Evaluates navigation requests against the route table and session state.
pub struct Navigator {
    table: RouteTable,
    session: Arc<SessionStore>,
    /// When false every entry is treated as public (auth-disabled deployments).
    guard_enabled: bool,
    current: Mutex<Location>,
}

impl Navigator {
    /// Creates a navigator starting at the login view.
    pub fn new(table: RouteTable, session: Arc<SessionStore>, guard_enabled: bool) -> Self {
        Self {
            table,
            session,
            guard_enabled,
            current: Mutex::new(Location::login()),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Evaluates one navigation request to exactly one outcome.
    pub fn navigate(&self, path: &str) -> NavOutcome {
        let Some(matched) = self.table.resolve(path) else {
            tracing::debug!("no route matches {path}");
            return NavOutcome::NotFound {
                path: path.to_string(),
            };
        };

        if matched.requires_auth && self.guard_enabled && !self.session.is_authenticated() {
            tracing::debug!("access to {path} denied, redirecting to login");
            self.set_current(Location::login());
            return NavOutcome::RedirectedToLogin {
                from: path.to_string(),
            };
        }

        let location = Location {
            view: matched.view,
            params: matched.params,
            path: path.to_string(),
        };
        self.set_current(location.clone());
        NavOutcome::Allowed(location)
    }

    /// Forces the current location to the login view.
    ///
    /// Used by the authorization-failure recovery path. Idempotent: forcing
    /// an already-active login view changes nothing.
    pub fn force_login(&self) {
        self.set_current(Location::login());
    }

    /// Returns the current location.
    pub fn current(&self) -> Location {
        self.current.lock().expect("location lock poisoned").clone()
    }

    fn set_current(&self, location: Location) {
        *self.current.lock().expect("location lock poisoned") = location;
    }
}
