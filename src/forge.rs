//! GitHub access for the release run.
//!
//! The [`traits::Forge`] trait is the raw API surface; [`manager::ForgeManager`]
//! layers the per-run cache and the dry-run gate on top of it.

/// Per-run lookup cache for milestones and issues.
pub mod cache;

/// Configuration and authentication for the GitHub connection.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Caching, dry-run aware wrapper around a forge.
pub mod manager;

/// Request types and value snapshots of remote objects.
pub mod request;

/// Forge trait abstracting the remote repository API.
pub mod traits;

#[cfg(test)]
mod tests;
