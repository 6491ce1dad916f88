//! Feature Panels
//!
//! Panel state and the card models rendered from it. Each panel is only
//! written after a successful fetch, so a failed reload leaves the previous
//! cards in place.

pub mod groups;
pub mod matches;
pub mod resources;
pub mod subjects;

pub use groups::{GroupCard, GroupDetail, GroupsPanel, Membership, ResourceLine};
pub use matches::{MatchCard, MatchesPanel, MatchesState};
pub use resources::{ResourceCard, ResourcesPanel};
pub use subjects::SubjectsPanel;
