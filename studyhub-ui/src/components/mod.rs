//! UI Components
//!
//! Chrome shared by every view.

pub mod alert;
pub mod auth_bar;
pub mod nav;

pub use alert::AlertBanner;
pub use auth_bar::AuthBar;
pub use nav::Nav;
