//! Resources panel: shared links and the share form

use crate::forms::ResourceForm;
use crate::models::{GroupOption, Resource};

pub const EMPTY: &str = "No resources yet.";
pub const LOAD_FAILED: &str = "Could not load resources.";
pub const SHARE_LOGIN_REQUIRED: &str = "You must be logged in to share a resource.";
pub const SHARED: &str = "Resource shared.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCard {
    pub title: String,
    pub link: Option<String>,
    /// "Group ID: <id> · By <uploader>"
    pub meta: String,
}

impl ResourceCard {
    pub fn new(resource: &Resource) -> Self {
        Self {
            title: resource.title.clone(),
            link: resource.link.clone(),
            meta: format!("Group ID: {} · By {}", resource.group, resource.uploader()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcesPanel {
    resources: Vec<Resource>,
    group_options: Vec<GroupOption>,
    form_open: bool,
    pub form: ResourceForm,
}

impl ResourcesPanel {
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn apply(&mut self, resources: Vec<Resource>) {
        self.resources = resources;
    }

    pub fn cards(&self) -> Vec<ResourceCard> {
        self.resources.iter().map(ResourceCard::new).collect()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.resources.is_empty().then_some(EMPTY)
    }

    pub fn group_options(&self) -> &[GroupOption] {
        &self.group_options
    }

    /// Repopulate the group select from the latest groups collection.
    ///
    /// The current selection is kept if that group is still listed,
    /// otherwise the first option becomes selected.
    pub fn set_group_options(&mut self, options: Vec<GroupOption>) {
        let still_listed = self
            .form
            .group
            .is_some_and(|id| options.iter().any(|o| o.id == id));
        if !still_listed {
            self.form.group = options.first().map(|o| o.id);
        }
        self.group_options = options;
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    /// Clear the text fields, keep the group selection valid, close
    pub fn reset_form(&mut self) {
        self.form = ResourceForm {
            group: self.group_options.first().map(|o| o.id),
            ..ResourceForm::default()
        };
        self.form_open = false;
    }
}
