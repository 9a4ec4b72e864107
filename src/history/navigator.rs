//! The router object handed to the application root.
//!
//! # Responsibilities
//! - Resolve navigation targets (paths or named routes) against the table
//! - Record navigations in the history
//! - Track the route for the current location
//!
//! # Design Decisions
//! - Unmatched locations are navigated to; `current()` is `None` and the
//!   host decides what to render
//! - Navigating to the current route (same name, params, query and hash)
//!   is rejected as a duplicate and leaves the history untouched; unmatched
//!   locations are compared as written

use std::sync::Arc;

use crate::history::web::WebHistory;
use crate::routing::{Params, RouteMatch, RouteTable, RouteTableError};

/// Where to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A location such as `/results/42?tab=urls`.
    Path(String),
    /// A route by name plus the parameters its pattern needs.
    Named { name: String, params: Params },
}

impl NavigationTarget {
    pub fn named(name: impl Into<String>, params: Params) -> Self {
        Self::Named {
            name: name.into(),
            params,
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("already at '{0}'")]
    Duplicated(String),

    #[error(transparent)]
    Resolve(#[from] RouteTableError),
}

/// A target turned into a concrete location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub location: String,
    pub route: Option<RouteMatch>,
}

/// Route table bound to a history.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: Arc<RouteTable>,
    history: WebHistory,
    current: Option<RouteMatch>,
}

impl Navigator {
    pub fn new(table: impl Into<Arc<RouteTable>>, history: WebHistory) -> Self {
        let table = table.into();
        let current = table.resolve(history.location());
        if current.is_none() {
            tracing::warn!(location = %history.location(), "Initial location matches no route");
        }
        Self {
            table,
            history,
            current,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn history(&self) -> &WebHistory {
        &self.history
    }

    /// Current location, relative to the base.
    pub fn location(&self) -> &str {
        self.history.location()
    }

    /// Route for the current location, if any matched.
    pub fn current(&self) -> Option<&RouteMatch> {
        self.current.as_ref()
    }

    pub fn resolve(&self, target: impl Into<NavigationTarget>) -> Result<Resolved, NavigationError> {
        let location = match target.into() {
            NavigationTarget::Path(path) if path.starts_with('/') => path,
            NavigationTarget::Path(path) => format!("/{}", path),
            NavigationTarget::Named { name, params } => self.table.href_for(&name, &params)?,
        };
        let route = self.table.resolve(&location);
        Ok(Resolved { location, route })
    }

    /// Absolute href for a target, including the base.
    pub fn href(&self, target: impl Into<NavigationTarget>) -> Result<String, NavigationError> {
        let resolved = self.resolve(target)?;
        Ok(self.history.create_href(&resolved.location))
    }

    pub fn push(
        &mut self,
        target: impl Into<NavigationTarget>,
    ) -> Result<Option<RouteMatch>, NavigationError> {
        let resolved = self.prepare(target)?;
        self.history.push(resolved.location);
        self.current = resolved.route;
        Ok(self.current.clone())
    }

    pub fn replace(
        &mut self,
        target: impl Into<NavigationTarget>,
    ) -> Result<Option<RouteMatch>, NavigationError> {
        let resolved = self.prepare(target)?;
        self.history.replace(resolved.location);
        self.current = resolved.route;
        Ok(self.current.clone())
    }

    pub fn go(&mut self, delta: isize) -> bool {
        if !self.history.go(delta) {
            return false;
        }
        self.current = self.table.resolve(self.history.location());
        tracing::debug!(delta, location = %self.history.location(), "History traversal");
        true
    }

    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    fn prepare(&self, target: impl Into<NavigationTarget>) -> Result<Resolved, NavigationError> {
        let resolved = self.resolve(target)?;
        let duplicated = match (&resolved.route, &self.current) {
            (Some(next), Some(current)) => next.same_destination(current),
            (None, None) => resolved.location == self.history.location(),
            _ => false,
        };
        if duplicated {
            return Err(NavigationError::Duplicated(resolved.location));
        }
        match &resolved.route {
            Some(route) => tracing::debug!(location = %resolved.location, route = %route.name, "Navigating"),
            None => tracing::warn!(location = %resolved.location, "No route matched, navigating anyway"),
        }
        Ok(resolved)
    }
}
