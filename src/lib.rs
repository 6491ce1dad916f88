//! # StudyHub
//!
//! Client for the StudyHub study-group service: a typed REST client over a
//! pluggable transport, plus the session, routing and panel state the front
//! ends render.
//!
//! ## Modules
//!
//! - [`api`]: REST client, transport seam and error types
//! - [`models`]: records exchanged with the API
//! - [`forms`]: form input and the checks run before any network call
//! - [`session`]: auth state, auth view and theme preference
//! - [`store`]: persisted key-value storage for the session
//! - [`view`]: view router
//! - [`alert`]: single-slot alert with ticketed auto-hide
//! - [`panels`]: per-feature panel state and card models
//! - [`app`]: native application context (feature `native`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use studyhub::{ApiClient, App, HttpTransport, LoginForm, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiClient::new("http://localhost:8000/api", HttpTransport::new());
//!     let mut app = App::new(client, MemoryStore::new(), Duration::from_millis(4000));
//!
//!     app.start().await;
//!     let _ = app.login(&LoginForm::new("ana", "secret")).await;
//!
//!     for card in app.groups.cards(app.auth().is_logged_in()) {
//!         println!("{} ({})", card.name, card.owner);
//!     }
//! }
//! ```

pub mod alert;
pub mod api;
#[cfg(feature = "native")]
pub mod app;
pub mod config;
pub mod forms;
pub mod models;
pub mod panels;
pub mod session;
pub mod store;
pub mod view;

// Re-export top-level types for convenience
pub use alert::{Alert, AlertKind, AlertSlot, Ticket, DEFAULT_ALERT_TIMEOUT_MS};

pub use api::{
    ApiClient, ApiRequest, ClientError, ClientResult, Method, RawResponse, ResponseBody,
    Transport, TransportError, DEFAULT_API_BASE,
};

#[cfg(feature = "native")]
pub use api::HttpTransport;

#[cfg(feature = "native")]
pub use app::{Alerts, App};

pub use config::{Config, ConfigError, LoggingConfig};

pub use forms::{
    Credentials, GroupForm, LoginForm, NewGroup, NewResource, RegisterForm, Registration,
    ResourceForm,
};

pub use models::{
    normalize_collection, Group, GroupOption, Match, MemberRef, Resource, ResourceSummary,
    Subject, SubjectRef,
};

pub use panels::{GroupsPanel, MatchesPanel, MatchesState, Membership, ResourcesPanel, SubjectsPanel};

pub use session::{AuthButton, AuthState, AuthView, Session, Theme};

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub use view::{Collection, Router, UnknownView, View};
