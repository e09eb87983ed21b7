//! CLI argument parsing.
use clap::Parser;
use log::*;
use secrecy::SecretString;
use std::env;

use crate::{ReleaseError, Result, config::ReleaseConfig};

/// Environment variable consulted when no token flag is given.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Close the release milestone, publish the release and open the next
/// milestone on GitHub.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value_t = false)]
    /// Stop before each step and ask to continue. Enables debug logging.
    pub debug: bool,

    #[arg(
        short = 'g',
        long = "github-repo-id",
        value_name = "ORG/REPO",
        default_value = ""
    )]
    /// GitHub repository to release against.
    pub github_repo: String,

    #[arg(short = 'y', long, default_value_t = false)]
    /// Change nothing on GitHub; log what would be done instead.
    pub dry_run: bool,

    #[arg(short = 'v', long, value_name = "VERSION", default_value = "")]
    /// Version to release. Also the tag name and milestone title.
    pub release_version: String,

    #[arg(short = 't', long, value_name = "TOKEN", default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,
}

impl Args {
    /// Validate arguments and build the run configuration.
    pub fn release_config(&self) -> Result<ReleaseConfig> {
        if self.debug {
            info!("[ARGS] --debug: user interaction required for each step");
        }
        if self.dry_run {
            info!("[ARGS] --dry-run: no changes will be made on GitHub");
        }

        if self.github_repo.is_empty() {
            return Err(ReleaseError::invalid_config(
                "GitHub repository not specified (--github-repo-id)",
            ));
        }

        ReleaseConfig::builder()
            .github_repo(self.github_repo.clone())
            .github_token(self.token()?)
            .release_version(self.release_version.clone())
            .dry_run(self.dry_run)
            .debug(self.debug)
            .build()
    }

    fn token(&self) -> Result<SecretString> {
        let mut token = self.github_token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var(GITHUB_TOKEN_ENV)
        {
            debug!("using token from {GITHUB_TOKEN_ENV}");
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(ReleaseError::InvalidArgs(format!(
                "must set github token (--github-token or {GITHUB_TOKEN_ENV})"
            )));
        }

        Ok(SecretString::from(token))
    }
}
