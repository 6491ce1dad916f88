//! Auth State
//!
//! The session (token + username) held in memory and mirrored to the
//! persisted store, plus the UI derived from it.

use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, StoreError};

/// Persisted key for the auth token
pub const TOKEN_KEY: &str = "token";
/// Persisted key for the username
pub const USERNAME_KEY: &str = "username";
/// Persisted key for the theme preference
pub const THEME_KEY: &str = "theme";

pub const LOGGED_IN: &str = "Logged in successfully.";
/// Shown when a failed login carries no server detail
pub const LOGIN_FAILED: &str = "Invalid credentials.";
pub const REGISTERED: &str = "Registration successful. You can now log in.";
pub const LOGGED_OUT: &str = "Logged out.";

/// Client-held proof of authentication, as returned by `POST /login/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}

/// In-memory session; whether it is present decides the auth view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    session: Option<Session>,
}

impl AuthState {
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Restore from the store. Both keys must be present and non-empty.
    pub fn restore(store: &impl KeyValueStore) -> Self {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let username = store.get(USERNAME_KEY).filter(|u| !u.is_empty());

        let session = match (token, username) {
            (Some(token), Some(username)) => {
                tracing::debug!(username = %username, "Restored session");
                Some(Session { token, username })
            }
            _ => None,
        };

        Self { session }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Hold the new session and persist it
    pub fn sign_in(&mut self, store: &mut impl KeyValueStore, session: Session) -> Result<(), StoreError> {
        tracing::info!(username = %session.username, "Signed in");
        store.set(TOKEN_KEY, &session.token)?;
        store.set(USERNAME_KEY, &session.username)?;
        self.session = Some(session);
        Ok(())
    }

    /// Drop the session from memory first, then from the store
    pub fn sign_out(&mut self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        if let Some(session) = self.session.take() {
            tracing::info!(username = %session.username, "Signed out");
        }
        let token = store.remove(TOKEN_KEY);
        let username = store.remove(USERNAME_KEY);
        token.and(username)
    }

    pub fn view(&self) -> AuthView {
        match &self.session {
            Some(session) => AuthView::LoggedIn {
                username: session.username.clone(),
            },
            None => AuthView::LoggedOut,
        }
    }
}

/// Auth-dependent chrome: status line, user pill, auth buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthView {
    LoggedIn { username: String },
    LoggedOut,
}

/// Buttons shown in the auth bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthButton {
    Login,
    Register,
    Logout,
}

impl AuthButton {
    pub fn label(&self) -> &'static str {
        match self {
            AuthButton::Login => "Login",
            AuthButton::Register => "Register",
            AuthButton::Logout => "Logout",
        }
    }
}

impl AuthView {
    pub fn status_line(&self) -> &'static str {
        match self {
            AuthView::LoggedIn { .. } => "You are logged in.",
            AuthView::LoggedOut => "You are not logged in.",
        }
    }

    pub fn user_pill(&self) -> String {
        match self {
            AuthView::LoggedIn { username } => format!("Hi, {}", username),
            AuthView::LoggedOut => String::new(),
        }
    }

    pub fn buttons(&self) -> &'static [AuthButton] {
        match self {
            AuthView::LoggedIn { .. } => &[AuthButton::Logout],
            AuthView::LoggedOut => &[AuthButton::Login, AuthButton::Register],
        }
    }

    /// Whether the "create group" / "share resource" buttons are shown
    pub fn can_create(&self) -> bool {
        matches!(self, AuthView::LoggedIn { .. })
    }
}

/// Color scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Flip and persist
    pub fn toggle(self, store: &mut impl KeyValueStore) -> Result<Self, StoreError> {
        let next = match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        store.set(THEME_KEY, next.as_str())?;
        Ok(next)
    }
}
