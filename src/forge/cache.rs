//! Per-run lookup cache for milestones and issues.
use std::collections::HashMap;

use crate::forge::request::{Issue, Milestone};

/// Holds everything fetched from the forge during one run so that each
/// identifier is requested at most once. Dropped with the process.
#[derive(Debug, Default)]
pub struct ForgeCache {
    milestones: Option<Vec<Milestone>>,
    issues: HashMap<u64, Option<Issue>>,
}

impl ForgeCache {
    pub fn milestones(&self) -> Option<&[Milestone]> {
        self.milestones.as_deref()
    }

    pub fn store_milestones(&mut self, milestones: Vec<Milestone>) {
        self.milestones = Some(milestones);
    }

    /// Swap in a newer snapshot of a milestone, or add it if the list is
    /// already loaded and does not know it yet.
    pub fn upsert_milestone(&mut self, milestone: Milestone) {
        let Some(milestones) = self.milestones.as_mut() else {
            return;
        };

        match milestones.iter_mut().find(|m| m.number == milestone.number) {
            Some(existing) => *existing = milestone,
            None => milestones.push(milestone),
        }
    }

    /// `None` when the issue was never looked up, `Some(None)` when it was
    /// looked up and does not exist.
    pub fn issue(&self, number: u64) -> Option<Option<&Issue>> {
        self.issues.get(&number).map(Option::as_ref)
    }

    pub fn store_issue(&mut self, number: u64, issue: Option<Issue>) {
        self.issues.insert(number, issue);
    }
}
