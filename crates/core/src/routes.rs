//! URL-fragment router shared by every surface.
//!
//! Four logical views plus the reserved `preview` fragment that forces the
//! full-screen preview-only render mode. Browser back/forward replays
//! fragments through [`Route::parse`], so every fragment — including ones
//! this build never wrote — must resolve to one of these.

use serde::{Deserialize, Serialize};

/// The reserved fragment value for preview-only mode.
pub const PREVIEW_FRAGMENT: &str = "preview";

/// A logical view of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    Editor,
    Analytics,
    Invoices,
    /// Full-screen preview-only render mode.
    Preview,
}

impl Route {
    /// Resolve a URL fragment to a route.
    ///
    /// Accepts the fragment with or without its leading `#`. Unknown and
    /// empty fragments resolve to the dashboard so stale or hand-typed
    /// URLs always land somewhere sensible.
    pub fn parse(fragment: &str) -> Route {
        match fragment.trim_start_matches('#') {
            "editor" => Route::Editor,
            "analytics" => Route::Analytics,
            "invoices" => Route::Invoices,
            PREVIEW_FRAGMENT => Route::Preview,
            _ => Route::Dashboard,
        }
    }

    /// The fragment this route writes to the address bar.
    pub fn fragment(&self) -> &'static str {
        match self {
            Route::Dashboard => "dashboard",
            Route::Editor => "editor",
            Route::Analytics => "analytics",
            Route::Invoices => "invoices",
            Route::Preview => PREVIEW_FRAGMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fragments_resolve_to_their_views() {
        assert_eq!(Route::parse("dashboard"), Route::Dashboard);
        assert_eq!(Route::parse("editor"), Route::Editor);
        assert_eq!(Route::parse("analytics"), Route::Analytics);
        assert_eq!(Route::parse("invoices"), Route::Invoices);
        assert_eq!(Route::parse("preview"), Route::Preview);
    }

    #[test]
    fn leading_hash_is_accepted() {
        assert_eq!(Route::parse("#editor"), Route::Editor);
        assert_eq!(Route::parse("#preview"), Route::Preview);
    }

    #[test]
    fn unknown_and_empty_fragments_fall_back_to_dashboard() {
        assert_eq!(Route::parse(""), Route::Dashboard);
        assert_eq!(Route::parse("#"), Route::Dashboard);
        assert_eq!(Route::parse("settings"), Route::Dashboard);
    }

    #[test]
    fn fragment_round_trips() {
        for route in [
            Route::Dashboard,
            Route::Editor,
            Route::Analytics,
            Route::Invoices,
            Route::Preview,
        ] {
            assert_eq!(Route::parse(route.fragment()), route);
        }
    }
}
