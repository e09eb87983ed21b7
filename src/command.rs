//! Wires configuration, the GitHub client and the orchestrator together for
//! a release run.
use log::*;
use std::rc::Rc;

use crate::{
    Result,
    config::ReleaseConfig,
    forge::{
        config::RemoteConfig,
        github::Github,
        manager::{CloseOutcome, ForgeManager, ForgeOptions},
    },
    orchestrator::{Orchestrator, RunOutcome},
    prompt::{Confirm, TerminalPrompt},
};

/// Execute a release run against GitHub with prompts on the terminal.
pub async fn execute(config: ReleaseConfig) -> Result<RunOutcome> {
    let remote = RemoteConfig::from(&config);
    let mut prompt = TerminalPrompt::stdio();

    execute_with(config, remote, &mut prompt).await
}

/// Execute a release run against `remote`, taking answers from `confirm`.
pub async fn execute_with(
    config: ReleaseConfig,
    remote: RemoteConfig,
    confirm: &mut dyn Confirm,
) -> Result<RunOutcome> {
    let github = Github::new(remote).await?;

    let forge = ForgeManager::new(
        Box::new(github),
        ForgeOptions {
            dry_run: config.dry_run,
        },
    );

    if forge.dry_run() {
        warn!("dry_run: no changes will be made on GitHub");
    }

    let orchestrator = Orchestrator::new(Rc::new(config), Rc::new(forge));

    let outcome = orchestrator.run(confirm).await?;

    report(&outcome);

    Ok(outcome)
}

fn report(outcome: &RunOutcome) {
    let report = match outcome {
        RunOutcome::Declined { step } => {
            info!("release stopped by user before: {step}");
            return;
        }
        RunOutcome::Completed(report) => report,
    };

    match &report.milestone_close {
        CloseOutcome::Closed(milestone) => {
            info!("closed milestone: {}", milestone.title)
        }
        CloseOutcome::AlreadyClosed => {
            info!("milestone was already closed")
        }
        CloseOutcome::Skipped => {}
    }

    if let Some(release) = &report.release {
        info!("released {}: {}", release.tag, release.html_url);
    }

    if let Some(milestone) = &report.next_milestone {
        info!("next milestone: {} (#{})", milestone.title, milestone.number);
    }

    if !report.dry_run_actions.is_empty() {
        info!(
            "dry_run: skipped {} changes on GitHub",
            report.dry_run_actions.len()
        );
    }
}
