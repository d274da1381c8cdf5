//! # viewroute-core
//!
//! Route table and resolver for single-page application navigation.
//!
//! This crate provides the lookup contract a navigation host calls into:
//!
//! - **Route** - Association between a path, a name and a view
//! - **RouteTable** - Validated, immutable, ordered set of routes
//! - **Resolver** - Path → view and name → route lookups
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  path / name  ┌─────────────┐     ┌─────────────┐
//! │ Navigation  │──────────────▶│  Resolver   │────▶│ RouteTable  │
//! │    host     │◀──────────────│             │     │ (immutable) │
//! └─────────────┘ RouteMatch or └─────────────┘     └─────────────┘
//!                   NotFound
//! ```
//!
//! ## Example
//!
//! ```
//! use viewroute_core::{NotFound, Resolver, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .route("/", "overview", "Overview")
//!     .route("/annotations", "flatmaps", "Annotations")
//!     .build()
//!     .unwrap();
//! let resolver = Resolver::new(table);
//!
//! assert_eq!(resolver.resolve("/annotations").unwrap().view_id, "Annotations");
//! assert_eq!(resolver.route_by_name("overview").unwrap().path, "/");
//! assert_eq!(resolver.resolve("/missing"), Err(NotFound::path("/missing")));
//! ```

pub mod resolver;
pub mod route;
pub mod table;

pub use resolver::{Lookup, NotFound, Resolver, RouteMatch};
pub use route::{normalize_location, Route};
pub use table::{RouteTable, RouteTableBuilder, TableError};
