//! View Router
//!
//! Exactly one named panel is visible at a time. Navigating from the nav bar
//! also tells the caller which collection the panel needs reloaded.

use std::str::FromStr;

/// Named panels of the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Dashboard,
    Groups,
    Resources,
    Matches,
    Auth,
}

/// Collections backed by a list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Subjects,
    Groups,
    Resources,
    Matches,
}

impl View {
    /// Order of the nav bar
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Groups,
        View::Resources,
        View::Matches,
        View::Auth,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Groups => "groups",
            View::Resources => "resources",
            View::Matches => "matches",
            View::Auth => "auth",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Groups => "Study Groups",
            View::Resources => "Resources",
            View::Matches => "Study Matches",
            View::Auth => "Login / Register",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            View::Dashboard => "Overview of your subjects and activity.",
            View::Groups => "Join or create groups to collaborate.",
            View::Resources => "Links and materials shared in your groups.",
            View::Matches => "Users who share subjects of interest with you.",
            View::Auth => "Manage your StudyHub account.",
        }
    }

    /// Short label for the nav bar
    pub fn nav_label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Groups => "Groups",
            View::Resources => "Resources",
            View::Matches => "Matches",
            View::Auth => "Account",
        }
    }

    /// Collection reloaded when the view is opened from the nav bar
    pub fn collection(&self) -> Option<Collection> {
        match self {
            View::Dashboard => Some(Collection::Subjects),
            View::Groups => Some(Collection::Groups),
            View::Resources => Some(Collection::Resources),
            View::Matches => Some(Collection::Matches),
            View::Auth => None,
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Tracks the single active view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Router {
    active: View,
}

impl Router {
    pub fn new(initial: View) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> View {
        self.active
    }

    /// Nav highlight
    pub fn is_active(&self, view: View) -> bool {
        self.active == view
    }

    /// Switch panels without reloading anything
    pub fn show(&mut self, view: View) {
        tracing::debug!(view = %view, "Show view");
        self.active = view;
    }

    /// Switch panels from the nav bar; returns the collection to reload
    pub fn navigate(&mut self, view: View) -> Option<Collection> {
        self.show(view);
        view.collection()
    }
}

/// Collections reloaded at startup and after login/logout
pub fn refresh_all(logged_in: bool) -> Vec<Collection> {
    let mut collections = vec![Collection::Subjects, Collection::Groups, Collection::Resources];
    if logged_in {
        collections.push(Collection::Matches);
    }
    collections
}
