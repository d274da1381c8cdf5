//! Metrics collection and export for viewroute.
//!
//! Uses the `metrics` crate for instrumentation and renders a Prometheus
//! text snapshot on request.

use anyhow::{Context, Result};
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;
use viewroute_core::Lookup;

/// Metric names.
pub mod names {
    pub const ROUTES_DECLARED: &str = "viewroute_routes_declared";
    pub const NAVIGATIONS_TOTAL: &str = "viewroute_navigations_total";
    pub const RESOLUTIONS_TOTAL: &str = "viewroute_resolutions_total";
    pub const MISSES_TOTAL: &str = "viewroute_misses_total";
}

/// Describe all metrics.
pub fn init_metrics() {
    metrics::describe_gauge!(names::ROUTES_DECLARED, "Number of routes in the table");
    metrics::describe_counter!(
        names::NAVIGATIONS_TOTAL,
        "Total number of navigation requests"
    );
    metrics::describe_counter!(
        names::RESOLUTIONS_TOTAL,
        "Total number of successful lookups, by view"
    );
    metrics::describe_counter!(
        names::MISSES_TOTAL,
        "Total number of lookups with no matching route"
    );

    info!("Metrics initialized");
}

/// Install the Prometheus recorder globally.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
pub fn install_exporter() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")
}

/// Record the size of the route table.
pub fn set_declared_routes(count: usize) {
    gauge!(names::ROUTES_DECLARED).set(count as f64);
}

/// Record a navigation request.
pub fn record_navigation() {
    counter!(names::NAVIGATIONS_TOTAL).increment(1);
}

/// Record a lookup that rendered a view.
pub fn record_resolution(view_id: &str) {
    counter!(names::RESOLUTIONS_TOTAL, "view" => view_id.to_string()).increment(1);
}

/// Record a lookup that matched nothing.
pub fn record_miss(lookup: Lookup) {
    counter!(names::MISSES_TOTAL, "lookup" => lookup.to_string()).increment(1);
}
