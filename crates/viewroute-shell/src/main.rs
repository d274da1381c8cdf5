//! # viewroute
//!
//! Resolve locations and route names against the application's route table.
//!
//! ## Usage
//!
//! ```bash
//! # List the route table
//! viewroute routes
//!
//! # Render the configured initial location
//! viewroute resolve
//!
//! # Navigate through several locations
//! viewroute resolve / /annotations?id=7
//!
//! # Navigate by route name, printing JSON and a metrics snapshot
//! viewroute --json --metrics name flatmaps overview
//!
//! # Use a specific config file
//! viewroute --config /path/to/viewroute.toml routes
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewroute_core::{Resolver, RouteMatch};
use viewroute_shell::{metrics, Config, MemoryHistory, NavigationError, RenderHost, Shell};

#[derive(Parser)]
#[command(name = "viewroute")]
#[command(about = "Resolve locations against the viewroute route table", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./viewroute.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// Print a Prometheus metrics snapshot after the run
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in declaration order
    Routes,
    /// Navigate to each location in turn
    Resolve {
        /// Locations to visit; the initial location when omitted
        locations: Vec<String>,
    },
    /// Navigate to each named route in turn
    Name {
        /// Route names to visit
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// Prints each rendered view to stdout.
struct ConsoleHost {
    json: bool,
}

impl RenderHost for ConsoleHost {
    fn render(&mut self, matched: RouteMatch<'_>) {
        if self.json {
            match serde_json::to_string(&matched) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!("Failed to encode route match: {}", e),
            }
        } else {
            println!("{} -> {} ({})", matched.name, matched.view_id, matched.path);
        }
    }
}

fn report(error: &NavigationError, json: bool) {
    tracing::warn!("{}", error);
    match (error, json) {
        (NavigationError::NotFound(not_found), true) => {
            match serde_json::to_string(&serde_json::json!({ "error": not_found })) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!("Failed to encode error: {}", e),
            }
        }
        _ => eprintln!("error: {error}"),
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viewroute=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let snapshot = if cli.metrics || config.metrics.enabled {
        Some(metrics::install_exporter()?)
    } else {
        None
    };
    metrics::init_metrics();

    let table = config.route_table()?;
    metrics::set_declared_routes(table.len());
    let resolver = Resolver::new(table);

    let host = ConsoleHost { json: cli.json };
    let mut failures = 0usize;

    match cli.command {
        Commands::Routes => {
            for route in resolver.table().routes() {
                if cli.json {
                    println!("{}", serde_json::to_string(route)?);
                } else {
                    println!("{:<24} {:<16} {}", route.path, route.name, route.view_id);
                }
            }
        }
        Commands::Resolve { locations } => {
            let mut shell = Shell::new(
                resolver,
                MemoryHistory::with_initial(config.initial_location.clone()),
                host,
            );
            if locations.is_empty() {
                if let Err(e) = shell.start() {
                    report(&e, cli.json);
                    failures += 1;
                }
            }
            for location in &locations {
                if let Err(e) = shell.navigate(location) {
                    report(&e, cli.json);
                    failures += 1;
                }
            }
        }
        Commands::Name { names } => {
            let mut shell = Shell::new(resolver, MemoryHistory::new(), host);
            for name in &names {
                if let Err(e) = shell.navigate_to_name(name) {
                    report(&e, cli.json);
                    failures += 1;
                }
            }
        }
    }

    if let Some(handle) = snapshot {
        print!("{}", handle.render());
    }

    if failures > 0 {
        tracing::info!(failures, "Finished with unresolved lookups");
        std::process::exit(1);
    }

    Ok(())
}
