//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::request::{
        CreateMilestoneRequest, CreateReleaseRequest, Issue, Milestone, Owner,
        Release, UpdateMilestoneRequest,
    },
};

/// Remote repository API consumed by the release run. Implementations are
/// thin: caching and dry-run handling live in
/// [`ForgeManager`](crate::forge::manager::ForgeManager).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge {
    /// Look `name` up as an organization, falling back to a user account.
    async fn resolve_owner(&self, name: &str) -> Result<Owner>;

    /// All milestones of the repository, open and closed.
    async fn list_milestones(&self) -> Result<Vec<Milestone>>;

    async fn get_issue(&self, number: u64) -> Result<Option<Issue>>;

    async fn create_milestone(
        &self,
        req: CreateMilestoneRequest,
    ) -> Result<Milestone>;

    async fn update_milestone(
        &self,
        req: UpdateMilestoneRequest,
    ) -> Result<Milestone>;

    async fn create_release(&self, req: CreateReleaseRequest)
    -> Result<Release>;
}
