//! Groups panel: list, detail, membership actions, create form

use crate::forms::GroupForm;
use crate::models::{Group, GroupOption};

pub const EMPTY: &str = "No groups yet. Create one to get started.";
pub const DETAIL_PLACEHOLDER: &str = "Select a group from the list to see details here.";
pub const LOAD_FAILED: &str = "Could not load groups.";
pub const DETAIL_FAILED: &str = "Could not load group details.";
pub const CREATE_LOGIN_REQUIRED: &str = "You must be logged in to create a group.";
pub const CREATED: &str = "Group created successfully.";

pub const NO_SUBJECTS: &str = "None";
pub const NO_MEMBERS: &str = "No members yet";
pub const NO_RESOURCES: &str = "No resources yet";

/// Join or leave a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Join,
    Leave,
}

impl Membership {
    pub fn label(&self) -> &'static str {
        match self {
            Membership::Join => "Join",
            Membership::Leave => "Leave",
        }
    }

    pub fn login_required(&self) -> &'static str {
        match self {
            Membership::Join => "You must be logged in to join a group.",
            Membership::Leave => "You must be logged in to leave a group.",
        }
    }

    pub fn succeeded(&self) -> &'static str {
        match self {
            Membership::Join => "Joined group.",
            Membership::Leave => "Left group.",
        }
    }

    pub fn failed(&self) -> &'static str {
        match self {
            Membership::Join => "Could not join group.",
            Membership::Leave => "Could not leave group.",
        }
    }
}

/// One group in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCard {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub owner: String,
    /// Join is only offered to signed-in users
    pub can_join: bool,
}

impl GroupCard {
    pub fn new(group: &Group, signed_in: bool) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            description: group.description_text().to_string(),
            owner: group.owner().to_string(),
            can_join: signed_in,
        }
    }
}

/// Link line in the group detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLine {
    pub title: String,
    pub link: Option<String>,
    pub uploader: String,
}

/// Detail pane of the selected group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDetail {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub subjects: Vec<String>,
    pub members: Vec<String>,
    pub resources: Vec<ResourceLine>,
    /// Join and Leave actions
    pub can_manage: bool,
}

impl GroupDetail {
    pub fn new(group: &Group, signed_in: bool) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            description: group.description_text().to_string(),
            subjects: group.subjects.iter().map(|s| s.label()).collect(),
            members: group.members.iter().map(|m| m.to_string()).collect(),
            resources: group
                .resources
                .iter()
                .map(|r| ResourceLine {
                    title: r.title.clone(),
                    link: r.link.clone(),
                    uploader: r.uploader().to_string(),
                })
                .collect(),
            can_manage: signed_in,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupsPanel {
    groups: Vec<Group>,
    detail: Option<Group>,
    form_open: bool,
    pub form: GroupForm,
}

impl GroupsPanel {
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn selected(&self) -> Option<&Group> {
        self.detail.as_ref()
    }

    /// Re-rendering the list resets the detail pane to its placeholder
    pub fn apply_list(&mut self, groups: Vec<Group>) {
        self.groups = groups;
        self.detail = None;
    }

    pub fn apply_detail(&mut self, group: Group) {
        self.detail = Some(group);
    }

    pub fn options(&self) -> Vec<GroupOption> {
        self.groups.iter().map(Group::option).collect()
    }

    pub fn cards(&self, signed_in: bool) -> Vec<GroupCard> {
        self.groups.iter().map(|g| GroupCard::new(g, signed_in)).collect()
    }

    pub fn detail(&self, signed_in: bool) -> Option<GroupDetail> {
        self.detail.as_ref().map(|g| GroupDetail::new(g, signed_in))
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.groups.is_empty().then_some(EMPTY)
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

    /// After a successful create: clear the fields and close
    pub fn reset_form(&mut self) {
        self.form = GroupForm::default();
        self.form_open = false;
    }
}
