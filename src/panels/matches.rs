//! Matches panel

use crate::models::Match;

pub const LOGIN_REQUIRED: &str = "You must be logged in to see matches.";
pub const EMPTY: &str = "No matches yet. Add subjects to your profile first.";
pub const LOAD_FAILED: &str = "Could not load matches.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MatchesState {
    #[default]
    NotLoaded,
    /// Shown without calling the API when there is no session
    LoginRequired,
    Loaded(Vec<Match>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCard {
    pub username: String,
    pub subjects: Vec<String>,
}

impl MatchCard {
    pub fn new(m: &Match) -> Self {
        Self {
            username: m.username.clone(),
            subjects: m.subjects.iter().map(|s| s.name.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchesPanel {
    state: MatchesState,
}

impl MatchesPanel {
    pub fn state(&self) -> &MatchesState {
        &self.state
    }

    pub fn require_login(&mut self) {
        self.state = MatchesState::LoginRequired;
    }

    pub fn apply(&mut self, matches: Vec<Match>) {
        self.state = MatchesState::Loaded(matches);
    }

    pub fn cards(&self) -> Vec<MatchCard> {
        match &self.state {
            MatchesState::Loaded(matches) => matches.iter().map(MatchCard::new).collect(),
            _ => Vec::new(),
        }
    }

    /// Placeholder text in place of cards
    pub fn message(&self) -> Option<&'static str> {
        match &self.state {
            MatchesState::NotLoaded => None,
            MatchesState::LoginRequired => Some(LOGIN_REQUIRED),
            MatchesState::Loaded(matches) if matches.is_empty() => Some(EMPTY),
            MatchesState::Loaded(_) => None,
        }
    }
}
