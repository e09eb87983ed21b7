use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Open/closed state shared by milestones and issues.
pub enum State {
    Open,
    Closed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Open => write!(f, "open"),
            State::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Snapshot of a remote milestone. Never edited in place: mutations go
/// through the forge and come back as a new snapshot.
pub struct Milestone {
    pub number: u64,
    pub title: String,
    pub state: State,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Snapshot of a remote issue.
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: State,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Snapshot of a published release.
pub struct Release {
    pub id: u64,
    pub tag: String,
    pub title: String,
    pub body: String,
    pub html_url: String,
    pub draft: bool,
    pub prerelease: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    Organization,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account that owns the repository being released.
pub struct Owner {
    pub login: String,
    pub kind: OwnerKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Request to open a new milestone.
pub struct CreateMilestoneRequest {
    pub title: String,
    pub state: State,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to edit an existing milestone.
pub struct UpdateMilestoneRequest {
    pub number: u64,
    pub title: String,
    pub state: State,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Request to publish a release for an existing or new tag.
pub struct CreateReleaseRequest {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}
