//! Subjects panel (dashboard)

use crate::models::Subject;

pub const EMPTY: &str = "No subjects found.";
pub const LOAD_FAILED: &str = "Could not load subjects.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectsPanel {
    subjects: Vec<Subject>,
}

impl SubjectsPanel {
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn apply(&mut self, subjects: Vec<Subject>) {
        self.subjects = subjects;
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.subjects.is_empty().then_some(EMPTY)
    }
}
