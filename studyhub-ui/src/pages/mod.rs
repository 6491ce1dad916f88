//! Pages
//!
//! One component per view.

pub mod auth;
pub mod dashboard;
pub mod groups;
pub mod matches;
pub mod resources;

pub use auth::Auth;
pub use dashboard::Dashboard;
pub use groups::Groups;
pub use matches::Matches;
pub use resources::Resources;
