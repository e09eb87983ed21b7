//! Sequential release run: close milestone, publish release, open next
//! milestone.
use log::*;
use std::rc::Rc;

use crate::{
    ReleaseError, Result,
    config::ReleaseConfig,
    forge::{
        manager::{CloseOutcome, ForgeManager},
        request::{CreateReleaseRequest, Milestone, Owner, Release},
    },
    prompt::Confirm,
};

pub const STEP_INITIALIZE: &str = "Initialization...";
pub const STEP_CLOSE_MILESTONE: &str = "Close GitHub Milestone...";
pub const STEP_CREATE_RELEASE: &str = "Create new GitHub release...";
pub const STEP_CREATE_MILESTONE: &str = "Create new GitHub milestone...";

/// What a completed run did at each step.
#[derive(Debug)]
pub struct ReleaseReport {
    pub owner: Owner,
    pub milestone_close: CloseOutcome,
    /// `None` under dry run.
    pub release: Option<Release>,
    /// `None` under dry run or when creating it failed.
    pub next_milestone: Option<Milestone>,
    /// What dry run skipped, in step order. Empty on a real run.
    pub dry_run_actions: Vec<String>,
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed(ReleaseReport),
    /// The operator answered "no" before `step`.
    Declined { step: String },
}

pub struct Orchestrator {
    config: Rc<ReleaseConfig>,
    forge: Rc<ForgeManager>,
}

impl Orchestrator {
    pub fn new(config: Rc<ReleaseConfig>, forge: Rc<ForgeManager>) -> Self {
        Self { config, forge }
    }

    /// Run every step in order. Any error aborts the run where it happened;
    /// earlier steps are not rolled back.
    pub async fn run(&self, confirm: &mut dyn Confirm) -> Result<RunOutcome> {
        info!("{STEP_INITIALIZE}");

        let owner = self.initialize().await?;

        if self.config.debug {
            debug!("current config: {:#?}", self.config);
            if !confirm.confirm("[DEBUG] Continue?")? {
                return Ok(declined(STEP_INITIALIZE));
            }
        }

        if !self.begin_step(STEP_CLOSE_MILESTONE, confirm)? {
            return Ok(declined(STEP_CLOSE_MILESTONE));
        }
        let (milestone, milestone_close) = self.close_milestone().await?;

        if !self.begin_step(STEP_CREATE_RELEASE, confirm)? {
            return Ok(declined(STEP_CREATE_RELEASE));
        }
        let release = self.create_release(&milestone).await?;

        if !self.begin_step(STEP_CREATE_MILESTONE, confirm)? {
            return Ok(declined(STEP_CREATE_MILESTONE));
        }
        let next_milestone = self.create_next_milestone().await;

        Ok(RunOutcome::Completed(ReleaseReport {
            owner,
            milestone_close,
            release,
            next_milestone,
            dry_run_actions: self.forge.dry_run_actions().await,
        }))
    }

    /// Resolve the repository owner and make sure the release milestone
    /// exists before anything is changed.
    async fn initialize(&self) -> Result<Owner> {
        let owner = self.forge.resolve_owner(&self.config.repo.owner).await?;

        debug!("repository owner: {:?}", owner);

        let milestone = self.release_milestone().await?;

        info!("milestone '{}' found!", milestone.title);

        Ok(owner)
    }

    fn begin_step(
        &self,
        message: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<bool> {
        info!("{message}");

        if self.config.debug {
            return confirm
                .confirm(&format!("[DEBUG] Continue with next step '{message}'?"));
        }

        Ok(true)
    }

    async fn release_milestone(&self) -> Result<Milestone> {
        let expected = &self.config.expected_milestone_title;

        self.forge
            .find_release_milestone(expected)
            .await?
            .ok_or_else(|| {
                error!(
                    "milestone not found! searched for milestone with name '{expected}'"
                );
                ReleaseError::MilestoneNotFound(expected.clone())
            })
    }

    async fn close_milestone(&self) -> Result<(Milestone, CloseOutcome)> {
        let milestone = self.release_milestone().await?;
        let outcome = self.forge.close_milestone(&milestone).await?;
        Ok((milestone, outcome))
    }

    async fn create_release(
        &self,
        milestone: &Milestone,
    ) -> Result<Option<Release>> {
        let url = self.config.closed_milestone_url(milestone.number)?;

        self.forge
            .create_release(CreateReleaseRequest {
                tag_name: self.config.tag_name.clone(),
                name: self.config.release_version.clone(),
                body: format!("[ChangeLog by Milestone]({url})"),
                draft: false,
                prerelease: false,
            })
            .await
    }

    async fn create_next_milestone(&self) -> Option<Milestone> {
        let title = self.config.next_milestone_title();

        match self.forge.create_milestone(&title).await {
            Ok(milestone) => milestone,
            Err(err) => {
                warn!(
                    "failed to create the next release milestone (is it already created?): {err}"
                );
                None
            }
        }
    }
}

fn declined(step: &str) -> RunOutcome {
    info!("stopped before step: {step}");
    RunOutcome::Declined {
        step: step.to_string(),
    }
}
