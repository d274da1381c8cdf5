//! Shell configuration.
//!
//! Configuration can be loaded from:
//! - A TOML configuration file
//! - Environment variables (VIEWROUTE_*), which override the file

use crate::routes;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use viewroute_core::{Route, RouteTable};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "VIEWROUTE";

/// Files searched, in order, when no path is given.
const CONFIG_PATHS: [&str; 2] = ["viewroute.toml", "~/.config/viewroute/viewroute.toml"];

/// Shell configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Location the shell starts at.
    #[serde(default = "default_initial_location")]
    pub initial_location: String,

    /// Route table. The application's declared routes are used when empty.
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Metrics configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Print a Prometheus snapshot after the run.
    #[serde(default)]
    pub enabled: bool,
}

fn default_initial_location() -> String {
    "/".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_location: default_initial_location(),
            routes: Vec::new(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the first default path that exists, or from
    /// the environment alone.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        for path in &CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::from_file(expanded.as_ref());
            }
        }

        ::config::Config::builder()
            .add_source(environment(None))
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to read configuration from environment")
    }

    /// Load configuration from a specific file, with environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_env(path.as_ref(), None)
    }

    /// Load a file, reading overrides from `vars` instead of the process
    /// environment when given.
    fn from_file_with_env(
        path: &Path,
        vars: Option<::config::Map<String, String>>,
    ) -> Result<Self> {
        ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .add_source(environment(vars))
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Build the configured route table.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured routes fail validation.
    pub fn route_table(&self) -> Result<RouteTable> {
        if self.routes.is_empty() {
            return routes::declared_table().context("Invalid declared route table");
        }
        RouteTable::new(self.routes.iter().cloned()).context("Invalid route table in configuration")
    }
}

/// `VIEWROUTE_*` overrides; nested keys use `__` (`VIEWROUTE_METRICS__ENABLED`).
fn environment(vars: Option<::config::Map<String, String>>) -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.initial_location, "/");
        assert!(config.routes.is_empty());
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_default_uses_declared_routes() {
        let table = Config::default().route_table().unwrap();
        let names: Vec<&str> = table.routes().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["overview", "flatmaps"]);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            initial_location = "/annotations"

            [[routes]]
            path = "/"
            name = "home"
            view_id = "Home"

            [metrics]
            enabled = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.initial_location, "/annotations");
        assert_eq!(config.routes, vec![Route::new("/", "home", "Home")]);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_config_rejects_duplicate_routes() {
        let config = Config {
            routes: vec![Route::new("/", "a", "A"), Route::new("/", "b", "B")],
            ..Config::default()
        };
        assert!(config.route_table().is_err());
    }

    fn write_config(tag: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "viewroute-test-{}-{}.toml",
            std::process::id(),
            tag
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{contents}").unwrap();
        path
    }

    fn env(pairs: &[(&str, &str)]) -> Option<::config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_config_from_file() {
        let path = write_config(
            "file",
            r#"
            [[routes]]
            path = "/maps"
            name = "maps"
            view_id = "Maps"
            "#,
        );

        let config = Config::from_file_with_env(&path, env(&[])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.initial_location, "/");
        assert_eq!(config.routes, vec![Route::new("/maps", "maps", "Maps")]);
    }

    #[test]
    fn test_env_overrides_file() {
        let path = write_config(
            "env",
            r#"
            initial_location = "/"

            [metrics]
            enabled = false
            "#,
        );

        let config = Config::from_file_with_env(
            &path,
            env(&[
                ("VIEWROUTE_INITIAL_LOCATION", "/annotations"),
                ("VIEWROUTE_METRICS__ENABLED", "true"),
                ("OTHER_INITIAL_LOCATION", "/ignored"),
            ]),
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.initial_location, "/annotations");
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_file_values_kept_without_overrides() {
        let path = write_config("noenv", "initial_location = \"/annotations\"");

        let config = Config::from_file_with_env(&path, env(&[])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.initial_location, "/annotations");
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::from_file("/nonexistent/viewroute.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/viewroute.toml"));
    }
}
