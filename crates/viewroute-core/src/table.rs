//! Immutable route table.
//!
//! The table is validated once at construction and never mutated afterwards.
//! Declaration order is preserved and decides which route wins a lookup.

use crate::route::{validate_name, validate_path, Route};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Route table construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two routes declare the same path.
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    /// Two routes declare the same name.
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    /// A route path is malformed.
    #[error("Invalid route path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A route name is malformed.
    #[error("Invalid route name '{name}': {reason}")]
    InvalidName {
        /// The offending name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A route has no view to render.
    #[error("Route '{0}' has an empty view id")]
    EmptyViewId(String),
}

/// An ordered, validated collection of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table from routes in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: a malformed path or name, an
    /// empty view id, or a path or name declared twice.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, TableError> {
        let routes: Vec<Route> = routes.into_iter().collect();

        let mut paths = HashSet::with_capacity(routes.len());
        let mut names = HashSet::with_capacity(routes.len());

        for route in &routes {
            validate_path(&route.path).map_err(|reason| TableError::InvalidPath {
                path: route.path.clone(),
                reason,
            })?;
            validate_name(&route.name).map_err(|reason| TableError::InvalidName {
                name: route.name.clone(),
                reason,
            })?;
            if route.view_id.is_empty() {
                return Err(TableError::EmptyViewId(route.name.clone()));
            }
            if !paths.insert(route.path.as_str()) {
                return Err(TableError::DuplicatePath(route.path.clone()));
            }
            if !names.insert(route.name.as_str()) {
                return Err(TableError::DuplicateName(route.name.clone()));
            }
            debug!(path = %route.path, name = %route.name, view = %route.view_id, "Declared route");
        }

        info!(routes = routes.len(), "Route table built");
        Ok(Self { routes })
    }

    /// Start a table declaration.
    #[must_use]
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> impl ExactSizeIterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// First route whose path equals `path`.
    #[must_use]
    pub fn find_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// First route whose name equals `name`.
    #[must_use]
    pub fn find_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }
}

/// Chained declaration of a [`RouteTable`].
#[derive(Debug, Default, Clone)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    /// Declare the next route.
    #[must_use]
    pub fn route(
        mut self,
        path: impl Into<String>,
        name: impl Into<String>,
        view_id: impl Into<String>,
    ) -> Self {
        self.routes.push(Route::new(path, name, view_id));
        self
    }

    /// Validate and freeze the declared routes.
    ///
    /// # Errors
    ///
    /// See [`RouteTable::new`].
    pub fn build(self) -> Result<RouteTable, TableError> {
        RouteTable::new(self.routes)
    }
}
