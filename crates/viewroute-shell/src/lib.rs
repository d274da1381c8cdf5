//! # viewroute-shell
//!
//! Navigation host for the viewroute route table.
//!
//! The shell owns no global state: a [`Resolver`](viewroute_core::Resolver)
//! is built from configuration at startup and passed into [`Shell`], which
//! drives a [`History`] and a [`RenderHost`].

pub mod config;
pub mod metrics;
pub mod routes;
pub mod shell;

pub use config::Config;
pub use shell::{History, MemoryHistory, NavigationError, RenderHost, Shell};
