//! Path-to-view resolution.
//!
//! The resolver answers two questions against a frozen [`RouteTable`]:
//! which view belongs to a path, and which route carries a name. Both are
//! pure lookups; a miss is reported as [`NotFound`] and never recovered here.

use crate::route::Route;
use crate::table::RouteTable;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

/// Which key a failed lookup was made by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    /// Lookup by URL path.
    Path,
    /// Lookup by route name.
    Name,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => f.write_str("path"),
            Self::Name => f.write_str("name"),
        }
    }
}

/// No route matches the requested key.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("No route with {lookup} '{requested_key}'")]
pub struct NotFound {
    /// The key that was looked up.
    pub requested_key: String,
    /// Whether the key was a path or a name.
    pub lookup: Lookup,
}

impl NotFound {
    /// A failed lookup by path.
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            requested_key: path.into(),
            lookup: Lookup::Path,
        }
    }

    /// A failed lookup by name.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            requested_key: name.into(),
            lookup: Lookup::Name,
        }
    }
}

/// A successful path resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMatch<'a> {
    /// Name of the matched route.
    pub name: &'a str,
    /// View to render.
    pub view_id: &'a str,
    /// Path of the matched route.
    pub path: &'a str,
}

impl<'a> From<&'a Route> for RouteMatch<'a> {
    fn from(route: &'a Route) -> Self {
        Self {
            name: &route.name,
            view_id: &route.view_id,
            path: &route.path,
        }
    }
}

/// Resolves paths and names against a shared, immutable route table.
///
/// Cloning is cheap and every clone reads the same table, so one resolver
/// can be handed to any number of callers or threads.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<RouteTable>,
}

impl Resolver {
    /// Create a resolver over a validated table.
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a normalized path to the view it renders.
    ///
    /// Matching is exact; the first route in declaration order wins.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] carrying `path` if no route declares it.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<'_>, NotFound> {
        match self.table.find_path(path) {
            Some(route) => {
                trace!(path = %path, name = %route.name, view = %route.view_id, "Resolved path");
                Ok(RouteMatch::from(route))
            }
            None => {
                trace!(path = %path, "No route for path");
                Err(NotFound::path(path))
            }
        }
    }

    /// Look up a route by its symbolic name.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] carrying `name` if no route has that name.
    pub fn route_by_name(&self, name: &str) -> Result<&Route, NotFound> {
        self.table.find_name(name).ok_or_else(|| {
            trace!(name = %name, "No route with name");
            NotFound::name(name)
        })
    }

    /// Check if a path resolves.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.table.find_path(path).is_some()
    }

    /// Check if a name is declared.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.table.find_name(name).is_some()
    }
}

impl From<RouteTable> for Resolver {
    fn from(table: RouteTable) -> Self {
        Self::new(table)
    }
}
