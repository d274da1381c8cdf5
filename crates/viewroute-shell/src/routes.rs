//! The application's declared route table.

use viewroute_core::{Route, RouteTable, TableError};

/// Routes declared by the application, in declaration order.
#[must_use]
pub fn declared_routes() -> Vec<Route> {
    vec![
        Route::new("/", "overview", "Overview"),
        Route::new("/annotations", "flatmaps", "Annotations"),
    ]
}

/// Build the declared table.
///
/// # Errors
///
/// Only fails if the declaration above is edited into an invalid state.
pub fn declared_table() -> Result<RouteTable, TableError> {
    RouteTable::new(declared_routes())
}
