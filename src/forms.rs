//! Form Input
//!
//! Raw form fields as typed by the user, and the presence checks that run
//! before any network call. Values are trimmed (except the group selection).

use serde::Serialize;

use crate::api::{ClientError, ClientResult};

pub const LOGIN_FIELDS_REQUIRED: &str = "Please fill in username and password.";
pub const REGISTER_FIELDS_REQUIRED: &str = "Please fill in all registration fields.";
pub const GROUP_NAME_REQUIRED: &str = "Group name is required.";
pub const RESOURCE_FIELDS_REQUIRED: &str = "Please fill in all fields.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> ClientResult<Credentials> {
        let username = self.username.trim();
        let password = self.password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::validation(LOGIN_FIELDS_REQUIRED));
        }
        Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

impl RegisterForm {
    /// Password confirmation is left to the server
    pub fn validate(&self) -> ClientResult<Registration> {
        let fields = [&self.username, &self.email, &self.password, &self.password2];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ClientError::validation(REGISTER_FIELDS_REQUIRED));
        }
        Ok(Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
            password2: self.password2.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupForm {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
}

impl GroupForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> ClientResult<NewGroup> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientError::validation(GROUP_NAME_REQUIRED));
        }
        Ok(NewGroup {
            name: name.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceForm {
    pub title: String,
    pub link: String,
    /// Selected group id; `None` when the select list is empty
    pub group: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewResource {
    pub title: String,
    pub link: String,
    pub group: u64,
}

impl ResourceForm {
    pub fn validate(&self) -> ClientResult<NewResource> {
        let title = self.title.trim();
        let link = self.link.trim();
        match self.group {
            Some(group) if !title.is_empty() && !link.is_empty() => Ok(NewResource {
                title: title.to_string(),
                link: link.to_string(),
                group,
            }),
            _ => Err(ClientError::validation(RESOURCE_FIELDS_REQUIRED)),
        }
    }
}
