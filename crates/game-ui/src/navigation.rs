//! Navigation between the main menu and a game session
//!
//! Views only ever request a route change; how the screen switches is up to
//! the [`Navigator`] implementation. [`NavigationHistory`] is the in-process
//! navigator used by the app shell and the tests.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Routes
// =============================================================================

/// Screens of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Route {
    /// Main menu (logo, high score, play and theme buttons)
    #[default]
    MainMenu,
    /// A game in progress
    GameSession,
}

impl Route {
    /// URL-style path for the route
    pub fn to_path(&self) -> &'static str {
        match self {
            Route::MainMenu => "/",
            Route::GameSession => "/GameSession",
        }
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Route::MainMenu => "FlashBack",
            Route::GameSession => "Game",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_path())
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Fire-and-forget route changes requested by views
pub trait Navigator: Send + Sync {
    /// Push a route onto the navigation stack
    fn push(&self, route: Route);
}

/// Navigator that records every pushed route
#[derive(Debug)]
pub struct NavigationHistory {
    entries: RwLock<Vec<Route>>,
}

impl NavigationHistory {
    /// Create a history rooted at `root`
    pub fn new(root: Route) -> Self {
        Self {
            entries: RwLock::new(vec![root]),
        }
    }

    /// Route on top of the stack
    pub fn current(&self) -> Route {
        self.entries.read().last().copied().unwrap_or_default()
    }

    /// All routes, bottom to top
    pub fn entries(&self) -> Vec<Route> {
        self.entries.read().clone()
    }

    /// Number of pushes since creation
    pub fn push_count(&self) -> usize {
        self.entries.read().len().saturating_sub(1)
    }

    /// How many times `route` was pushed
    pub fn pushes_of(&self, route: Route) -> usize {
        self.entries.read().iter().skip(1).filter(|r| **r == route).count()
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(Route::MainMenu)
    }
}

impl Navigator for NavigationHistory {
    fn push(&self, route: Route) {
        tracing::debug!(path = route.to_path(), "Navigating");
        self.entries.write().push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::MainMenu.to_path(), "/");
        assert_eq!(Route::GameSession.to_path(), "/GameSession");
        assert_eq!(Route::GameSession.to_string(), "/GameSession");
        assert_eq!(Route::MainMenu.title(), "FlashBack");
    }

    #[test]
    fn test_history_starts_at_root() {
        let history = NavigationHistory::default();
        assert_eq!(history.current(), Route::MainMenu);
        assert_eq!(history.push_count(), 0);
    }

    #[test]
    fn test_history_records_pushes() {
        let history = NavigationHistory::default();
        history.push(Route::GameSession);
        history.push(Route::MainMenu);

        assert_eq!(history.current(), Route::MainMenu);
        assert_eq!(history.entries(), vec![Route::MainMenu, Route::GameSession, Route::MainMenu]);
        assert_eq!(history.push_count(), 2);
        assert_eq!(history.pushes_of(Route::MainMenu), 1);
        assert_eq!(history.pushes_of(Route::GameSession), 1);
    }
}
