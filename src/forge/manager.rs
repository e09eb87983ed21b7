//! Manager that wraps forge implementations with caching and dry-run gating
use log::*;
use tokio::sync::Mutex;

use crate::{
    Result,
    forge::{
        cache::ForgeCache,
        config::MISSING_DESCRIPTION_PLACEHOLDER,
        request::{
            CreateMilestoneRequest, CreateReleaseRequest, Issue, Milestone,
            Owner, Release, State, UpdateMilestoneRequest,
        },
        traits::Forge,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ForgeOptions {
    /// Skip every mutating call and log what would have happened instead.
    pub dry_run: bool,
}

/// Result of asking the manager to close a milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The milestone was closed; holds the new snapshot.
    Closed(Milestone),
    /// The milestone was closed before this run: nothing was edited.
    AlreadyClosed,
    /// Dry run: nothing was edited.
    Skipped,
}

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    options: ForgeOptions,
    cache: Mutex<ForgeCache>,
    skipped: Mutex<Vec<String>>,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>, options: ForgeOptions) -> Self {
        Self {
            forge,
            options,
            cache: Mutex::new(ForgeCache::default()),
            skipped: Mutex::new(vec![]),
        }
    }

    pub fn dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Mutations skipped under dry run, in the order they were requested.
    pub async fn dry_run_actions(&self) -> Vec<String> {
        self.skipped.lock().await.clone()
    }

    async fn would(&self, action: String) {
        warn!("dry_run: would {action}");
        self.skipped.lock().await.push(action);
    }

    pub async fn resolve_owner(&self, name: &str) -> Result<Owner> {
        self.forge.resolve_owner(name).await
    }

    /// First milestone, open or closed, whose title contains `expected`.
    pub async fn find_release_milestone(
        &self,
        expected: &str,
    ) -> Result<Option<Milestone>> {
        let mut cache = self.cache.lock().await;

        if cache.milestones().is_none() {
            debug!("milestones not found in cache, retrieving from forge");
            let milestones = self.forge.list_milestones().await?;
            debug!("retrieved {} milestones", milestones.len());
            cache.store_milestones(milestones);
        }

        let found = cache
            .milestones()
            .unwrap_or_default()
            .iter()
            .find(|m| m.title.contains(expected))
            .cloned();

        Ok(found)
    }

    pub async fn find_issue(&self, number: u64) -> Result<Option<Issue>> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.issue(number) {
            return Ok(cached.cloned());
        }

        debug!("issue {number} not found in cache, retrieving from forge");

        let issue = self.forge.get_issue(number).await?;

        if issue.is_some() {
            info!("issue with number {number} found");
        }

        cache.store_issue(number, issue.clone());

        Ok(issue)
    }

    /// Close `milestone`, keeping its title and description.
    pub async fn close_milestone(
        &self,
        milestone: &Milestone,
    ) -> Result<CloseOutcome> {
        if self.options.dry_run {
            self.would(format!("close milestone: {}", milestone.title))
                .await;
            return Ok(CloseOutcome::Skipped);
        }

        if milestone.state == State::Closed {
            warn!(
                "milestone '{}' was already closed, please check",
                milestone.title
            );
            return Ok(CloseOutcome::AlreadyClosed);
        }

        let description = milestone
            .description
            .clone()
            .unwrap_or_else(|| MISSING_DESCRIPTION_PLACEHOLDER.to_string());

        let updated = self
            .forge
            .update_milestone(UpdateMilestoneRequest {
                number: milestone.number,
                title: milestone.title.clone(),
                state: State::Closed,
                description,
            })
            .await?;

        info!(
            "new status of milestone '{}' is: {}",
            updated.title, updated.state
        );

        self.cache.lock().await.upsert_milestone(updated.clone());

        Ok(CloseOutcome::Closed(updated))
    }

    /// Open a milestone titled `title`. Returns `None` under dry run.
    pub async fn create_milestone(
        &self,
        title: &str,
    ) -> Result<Option<Milestone>> {
        if self.options.dry_run {
            self.would(format!("create milestone with title '{title}'"))
                .await;
            return Ok(None);
        }

        info!("creating milestone '{title}' for next release");

        let milestone = self
            .forge
            .create_milestone(CreateMilestoneRequest {
                title: title.to_string(),
                state: State::Open,
            })
            .await?;

        info!("new milestone created: {}", milestone.number);

        self.cache.lock().await.upsert_milestone(milestone.clone());

        Ok(Some(milestone))
    }

    /// Publish a release. Returns `None` under dry run.
    pub async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Option<Release>> {
        if self.options.dry_run {
            self.would(format!(
                "create release {} for tag {}",
                req.name, req.tag_name
            ))
            .await;
            return Ok(None);
        }

        info!("creating release {} for tag {}", req.name, req.tag_name);

        let release = self.forge.create_release(req).await?;

        info!("release published: {}", release.html_url);

        Ok(Some(release))
    }
}
