//! API Data Model
//!
//! Records exchanged with the StudyHub REST API. They are passed through
//! largely unchanged; all validation and consistency is the server's job.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A subject of interest (e.g. "Linear Algebra")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    pub name: String,
}

/// Subject reference inside a group: either the nested record or its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectRef {
    Full(Subject),
    Id(u64),
}

impl SubjectRef {
    pub fn label(&self) -> String {
        match self {
            SubjectRef::Full(subject) => subject.name.clone(),
            SubjectRef::Id(id) => format!("#{}", id),
        }
    }
}

/// Group member: a username, or a bare user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberRef {
    Username(String),
    Id(u64),
}

impl std::fmt::Display for MemberRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberRef::Username(name) => f.write_str(name),
            MemberRef::Id(id) => write!(f, "user #{}", id),
        }
    }
}

/// Resource as embedded in a group detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub uploaded_by_username: Option<String>,
}

/// A study group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by_username: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberRef>,
    #[serde(default)]
    pub subjects: Vec<SubjectRef>,
    #[serde(default)]
    pub resources: Vec<ResourceSummary>,
}

impl Group {
    /// Description, or a placeholder when blank
    pub fn description_text(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "No description",
        }
    }

    pub fn owner(&self) -> &str {
        non_blank_or_dash(self.created_by_username.as_deref())
    }

    pub fn option(&self) -> GroupOption {
        GroupOption {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Entry of the group select list in the resource form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOption {
    pub id: u64,
    pub name: String,
}

/// A shared link belonging to a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub title: String,
    /// Null when the resource is an uploaded file
    #[serde(default)]
    pub link: Option<String>,
    pub group: u64,
    #[serde(default)]
    pub uploaded_by_username: Option<String>,
}

impl Resource {
    pub fn uploader(&self) -> &str {
        non_blank_or_dash(self.uploaded_by_username.as_deref())
    }
}

impl ResourceSummary {
    pub fn uploader(&self) -> &str {
        non_blank_or_dash(self.uploaded_by_username.as_deref())
    }
}

/// Another user sharing subjects with the current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub username: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

fn non_blank_or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

/// Unwrap a collection response.
///
/// Accepts a bare array or a paginated object carrying a `results` array.
/// An object without `results` yields an empty list.
pub fn normalize_collection<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        Value::Object(mut map) => match map.remove("results") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(results) => serde_json::from_value(results),
        },
        other => serde_json::from_value(other),
    }
}
