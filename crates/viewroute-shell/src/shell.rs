//! Navigation host.
//!
//! The shell receives a [`Resolver`] at construction, listens to a
//! [`History`] for locations and hands each resolved view to a
//! [`RenderHost`]. A location that matches no route is reported to the
//! caller; the shell never substitutes a fallback view.

use crate::metrics;
use thiserror::Error;
use tracing::{debug, info, warn};
use viewroute_core::{normalize_location, NotFound, Resolver, RouteMatch};

/// Navigation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// No route matched the requested path or name.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// History has no earlier entry to return to.
    #[error("No earlier history entry")]
    NoPreviousEntry,
}

/// Source of the current location and sink for navigation requests.
pub trait History {
    /// The current location, if any has been visited.
    fn current(&self) -> Option<&str>;

    /// Visit a new location, discarding any forward entries.
    fn push(&mut self, location: String);

    /// Step back one entry. Returns `false` at the oldest entry.
    fn back(&mut self) -> bool;

    /// Step forward one entry. Returns `false` at the newest entry.
    fn forward(&mut self) -> bool;
}

/// Displays the view chosen for a location.
pub trait RenderHost {
    /// Show the matched view.
    fn render(&mut self, matched: RouteMatch<'_>);
}

impl<F> RenderHost for F
where
    F: FnMut(RouteMatch<'_>),
{
    fn render(&mut self, matched: RouteMatch<'_>) {
        self(matched);
    }
}

/// In-memory history stack.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history positioned at `location`.
    #[must_use]
    pub fn with_initial(location: impl Into<String>) -> Self {
        Self {
            entries: vec![location.into()],
            cursor: 0,
        }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl History for MemoryHistory {
    fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    fn push(&mut self, location: String) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

/// Application shell driving navigation through an injected resolver.
pub struct Shell<H, R> {
    resolver: Resolver,
    history: H,
    host: R,
    /// Path of the view currently rendered.
    current: Option<String>,
}

impl<H: History, R: RenderHost> Shell<H, R> {
    /// Create a shell. Nothing is rendered until [`Shell::start`] or a
    /// navigation.
    #[must_use]
    pub fn new(resolver: Resolver, history: H, host: R) -> Self {
        debug!(routes = resolver.table().len(), "Creating shell");
        Self {
            resolver,
            history,
            host,
            current: None,
        }
    }

    /// Render the history's current location, or `/` if history is empty.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] if the location has no route.
    pub fn start(&mut self) -> Result<RouteMatch<'_>, NavigationError> {
        metrics::record_navigation();
        let location = self.history.current().unwrap_or("/");
        let path = normalize_location(location).into_owned();
        info!(location = %path, "Starting shell");

        let fresh = self.history.current().is_none();
        let matched = resolve_recorded(&self.resolver, &path)?;
        if fresh {
            self.history.push(path.clone());
        }
        self.host.render(matched);
        self.current = Some(path);
        Ok(matched)
    }

    /// Navigate to a location.
    ///
    /// The location is normalized first, so query strings, fragments and a
    /// trailing slash are ignored. On failure history and the rendered view
    /// are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] carrying the normalized path.
    pub fn navigate(&mut self, location: &str) -> Result<RouteMatch<'_>, NavigationError> {
        metrics::record_navigation();
        let path = normalize_location(location).into_owned();

        let matched = resolve_recorded(&self.resolver, &path)?;
        debug!(location = %location, path = %path, view = %matched.view_id, "Navigating");
        self.history.push(path.clone());
        self.host.render(matched);
        self.current = Some(path);
        Ok(matched)
    }

    /// Navigate to a route by its name.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] carrying the name.
    pub fn navigate_to_name(&mut self, name: &str) -> Result<RouteMatch<'_>, NavigationError> {
        metrics::record_navigation();

        let route = match self.resolver.route_by_name(name) {
            Ok(route) => route,
            Err(err) => {
                warn!(name = %name, "Navigation to unknown route name");
                metrics::record_miss(err.lookup);
                return Err(err.into());
            }
        };

        let matched = RouteMatch::from(route);
        metrics::record_resolution(matched.view_id);
        debug!(name = %name, path = %matched.path, view = %matched.view_id, "Navigating by name");
        self.history.push(route.path.clone());
        self.host.render(matched);
        self.current = Some(route.path.clone());
        Ok(matched)
    }

    /// Return to the previous history entry and render it.
    ///
    /// If the previous entry has no route, history is moved forward again so
    /// it keeps pointing at the rendered view.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NoPreviousEntry`] at the oldest entry, or
    /// [`NavigationError::NotFound`] if the restored location has no route.
    pub fn back(&mut self) -> Result<RouteMatch<'_>, NavigationError> {
        metrics::record_navigation();
        if !self.history.back() {
            return Err(NavigationError::NoPreviousEntry);
        }

        let path = normalize_location(self.history.current().unwrap_or("/")).into_owned();
        let matched = match resolve_recorded(&self.resolver, &path) {
            Ok(matched) => matched,
            Err(err) => {
                self.history.forward();
                return Err(err);
            }
        };
        debug!(path = %path, view = %matched.view_id, "Navigated back");
        self.host.render(matched);
        self.current = Some(path);
        Ok(matched)
    }

    /// The route currently rendered.
    #[must_use]
    pub fn current_route(&self) -> Option<RouteMatch<'_>> {
        let path = self.current.as_deref()?;
        self.resolver.resolve(path).ok()
    }

    /// The history provider.
    #[must_use]
    pub fn history(&self) -> &H {
        &self.history
    }

    /// The render host.
    #[must_use]
    pub fn host(&self) -> &R {
        &self.host
    }
}

/// Resolve a path, recording the outcome.
fn resolve_recorded<'a>(
    resolver: &'a Resolver,
    path: &str,
) -> Result<RouteMatch<'a>, NavigationError> {
    match resolver.resolve(path) {
        Ok(matched) => {
            metrics::record_resolution(matched.view_id);
            Ok(matched)
        }
        Err(err) => {
            warn!(path = %path, "Navigation to unknown path");
            metrics::record_miss(err.lookup);
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::declared_table;

    /// Render host that records view ids.
    #[derive(Debug, Default)]
    struct Recorder {
        views: Vec<String>,
    }

    impl RenderHost for Recorder {
        fn render(&mut self, matched: RouteMatch<'_>) {
            self.views.push(matched.view_id.to_string());
        }
    }

    fn shell(history: MemoryHistory) -> Shell<MemoryHistory, Recorder> {
        let resolver = Resolver::new(declared_table().unwrap());
        Shell::new(resolver, history, Recorder::default())
    }

    #[test]
    fn test_memory_history() {
        let mut history = MemoryHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.current(), None);
        assert!(!history.back());

        history.push("/".to_string());
        history.push("/annotations".to_string());
        assert_eq!(history.current(), Some("/annotations"));

        assert!(history.back());
        assert_eq!(history.current(), Some("/"));
        assert!(!history.back());

        assert!(history.forward());
        assert_eq!(history.current(), Some("/annotations"));
        assert!(!history.forward());
        assert!(history.back());

        // Pushing after going back drops the forward entry
        history.push("/other".to_string());
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some("/other"));
    }

    #[test]
    fn test_start_on_empty_history() {
        let mut shell = shell(MemoryHistory::new());

        let matched = shell.start().unwrap();
        assert_eq!(matched.view_id, "Overview");
        assert_eq!(shell.history().current(), Some("/"));
        assert_eq!(shell.host().views, ["Overview"]);
    }

    #[test]
    fn test_start_at_initial_location() {
        let mut shell = shell(MemoryHistory::with_initial("/annotations?id=3"));

        assert_eq!(shell.start().unwrap().name, "flatmaps");
        assert_eq!(shell.history().len(), 1);
        assert_eq!(shell.current_route().unwrap().view_id, "Annotations");
    }

    #[test]
    fn test_start_at_unknown_location() {
        let mut shell = shell(MemoryHistory::with_initial("/missing"));

        assert_eq!(
            shell.start(),
            Err(NavigationError::NotFound(NotFound::path("/missing")))
        );
        assert!(shell.host().views.is_empty());
        assert!(shell.current_route().is_none());
    }

    #[test]
    fn test_navigate() {
        let mut shell = shell(MemoryHistory::new());

        assert_eq!(shell.navigate("/").unwrap().view_id, "Overview");
        assert_eq!(shell.navigate("/annotations/#layer").unwrap().view_id, "Annotations");

        assert_eq!(shell.history().current(), Some("/annotations"));
        assert_eq!(shell.host().views, ["Overview", "Annotations"]);
    }

    #[test]
    fn test_failed_navigation_changes_nothing() {
        let mut shell = shell(MemoryHistory::new());
        shell.navigate("/annotations").unwrap();

        let err = shell.navigate("/missing?x=1").unwrap_err();
        assert_eq!(err, NavigationError::NotFound(NotFound::path("/missing")));

        assert_eq!(shell.history().len(), 1);
        assert_eq!(shell.history().current(), Some("/annotations"));
        assert_eq!(shell.current_route().unwrap().name, "flatmaps");
        assert_eq!(shell.host().views, ["Annotations"]);
    }

    #[test]
    fn test_navigate_to_name() {
        let mut shell = shell(MemoryHistory::new());

        let matched = shell.navigate_to_name("flatmaps").unwrap();
        assert_eq!(matched.path, "/annotations");
        assert_eq!(shell.history().current(), Some("/annotations"));

        assert_eq!(
            shell.navigate_to_name("nope"),
            Err(NavigationError::NotFound(NotFound::name("nope")))
        );
        assert_eq!(shell.host().views, ["Annotations"]);
    }

    #[test]
    fn test_back() {
        let mut shell = shell(MemoryHistory::new());
        assert_eq!(shell.back(), Err(NavigationError::NoPreviousEntry));

        shell.navigate("/").unwrap();
        shell.navigate("/annotations").unwrap();

        assert_eq!(shell.back().unwrap().view_id, "Overview");
        assert_eq!(shell.current_route().unwrap().name, "overview");
        assert_eq!(shell.back(), Err(NavigationError::NoPreviousEntry));
        assert_eq!(shell.host().views, ["Overview", "Annotations", "Overview"]);
    }

    #[test]
    fn test_back_to_unknown_location_keeps_state() {
        let mut shell = shell(MemoryHistory::with_initial("/missing"));
        assert!(shell.start().is_err());
        shell.navigate("/annotations").unwrap();

        assert_eq!(
            shell.back(),
            Err(NavigationError::NotFound(NotFound::path("/missing")))
        );
        assert_eq!(shell.history().current(), Some("/annotations"));
        assert_eq!(shell.current_route().unwrap().name, "flatmaps");
        assert_eq!(shell.host().views, ["Annotations"]);
    }

    #[test]
    fn test_every_entry_point_counts_a_navigation() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let mut shell = shell(MemoryHistory::new());

        ::metrics::with_local_recorder(&recorder, || {
            shell.start().unwrap();
            shell.navigate("/annotations").unwrap();
            shell.navigate_to_name("overview").unwrap();
            shell.back().unwrap();
            shell.back().unwrap();
            assert_eq!(shell.back(), Err(NavigationError::NoPreviousEntry));
        });

        let rendered = handle.render();
        assert!(rendered.contains("viewroute_navigations_total 6"), "{rendered}");
    }

    #[test]
    fn test_closure_render_host() {
        let mut seen = Vec::new();
        {
            let resolver = Resolver::new(declared_table().unwrap());
            let mut shell = Shell::new(resolver, MemoryHistory::new(), |m: RouteMatch<'_>| {
                seen.push(m.name.to_string());
            });
            shell.navigate_to_name("overview").unwrap();
            shell.navigate("/annotations").unwrap();
        }
        assert_eq!(seen, ["overview", "flatmaps"]);
    }
}
