//! Route records and path helpers.
//!
//! A route associates a literal URL path with a symbolic name and the
//! identifier of the view rendered for it.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Maximum route path length.
pub const MAX_PATH_LENGTH: usize = 2048;

/// Maximum route name length.
pub const MAX_NAME_LENGTH: usize = 256;

/// A single entry of a route table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    /// Literal URL path, matched exactly.
    pub path: String,
    /// Unique symbolic name used for programmatic navigation.
    pub name: String,
    /// Identifier of the externally owned view.
    pub view_id: String,
}

impl Route {
    /// Create a new route.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        view_id: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view_id: view_id.into(),
        }
    }
}

/// Validate a route path.
///
/// # Errors
///
/// Returns an error message if the path is not a literal, normalized URL path.
pub fn validate_path(path: &str) -> Result<(), &'static str> {
    if path.is_empty() {
        return Err("Route path cannot be empty");
    }
    if !path.starts_with('/') {
        return Err("Route path must start with '/'");
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err("Route path too long");
    }
    if path.contains(['?', '#']) {
        return Err("Route path cannot contain a query or fragment");
    }
    if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("Route path contains invalid characters");
    }
    Ok(())
}

/// Validate a route name.
///
/// # Errors
///
/// Returns an error message if the name is empty or malformed.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("Route name cannot be empty");
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err("Route name too long");
    }
    if name.chars().any(char::is_control) {
        return Err("Route name contains invalid characters");
    }
    Ok(())
}

/// Reduce a raw location to the form the resolver matches against.
///
/// Drops any query string and fragment, ensures a leading `/` and removes a
/// trailing `/` from everything but the root. Borrows when the input is
/// already normalized.
#[must_use]
pub fn normalize_location(raw: &str) -> Cow<'_, str> {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let mut path = &raw[..end];

    while path.len() > 1 && path.ends_with('/') {
        path = &path[..path.len() - 1];
    }

    if path.starts_with('/') {
        if path.len() == raw.len() {
            Cow::Borrowed(raw)
        } else {
            Cow::Borrowed(path)
        }
    } else if path.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{path}"))
    }
}
