//! Run configuration populated once from the command line.
use derive_builder::Builder;
use log::*;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::sync::LazyLock;
use url::Url;

use crate::{ReleaseError, Result, version};

/// Web host used for links placed into release notes.
pub const DEFAULT_WEB_BASE_URL: &str = "https://github.com";

static REPO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<owner>[A-Za-z0-9_.-]+)/(?<name>[A-Za-z0-9_.-]+)$")
        .unwrap()
});

/// Repository identity in `<owner>/<name>` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn parse(repo_id: &str) -> Result<Self> {
        let captures = REPO_ID_REGEX.captures(repo_id).ok_or_else(|| {
            ReleaseError::invalid_config(format!(
                "'{repo_id}' is not a valid GitHub repository name"
            ))
        })?;

        Ok(Self {
            owner: captures["owner"].to_string(),
            name: captures["name"].to_string(),
        })
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct ReleaseConfigParams {
    /// Repository to release against, `<owner>/<name>`.
    pub github_repo: String,
    /// Access token used for every forge call.
    pub github_token: SecretString,
    /// Version being released; also the tag name and milestone title.
    pub release_version: String,
    /// Explicit next version. Derived from `release_version` when unset.
    #[builder(setter(into, strip_option), default)]
    pub next_version: Option<String>,
    #[builder(default)]
    pub dry_run: bool,
    #[builder(default)]
    pub debug: bool,
}

impl ReleaseConfigParamsBuilder {
    pub fn build(&self) -> Result<ReleaseConfig> {
        let params = self._build().map_err(|e| {
            ReleaseError::invalid_config(format!(
                "Failed to build release config: {}",
                e
            ))
        })?;
        ReleaseConfig::new(params)
    }
}

/// Validated, immutable configuration for a single release run.
#[derive(Debug)]
pub struct ReleaseConfig {
    pub repo: RepoId,
    pub token: SecretString,
    pub release_version: String,
    pub next_version: String,
    pub tag_name: String,
    pub expected_milestone_title: String,
    pub dry_run: bool,
    pub debug: bool,
    pub web_base_url: Url,
}

impl ReleaseConfig {
    pub fn builder() -> ReleaseConfigParamsBuilder {
        ReleaseConfigParamsBuilder::default()
    }

    pub fn new(params: ReleaseConfigParams) -> Result<Self> {
        let repo = RepoId::parse(&params.github_repo)?;

        info!("releasing against GitHub repository '{repo}'");

        if params.github_token.expose_secret().is_empty() {
            return Err(ReleaseError::invalid_config("GitHub token is empty"));
        }

        let release_version = params.release_version.trim().to_string();

        if release_version.is_empty() {
            return Err(ReleaseError::invalid_config(
                "release version not specified",
            ));
        }

        info!("release tag name: {release_version}");

        let next_version = match params.next_version {
            Some(next) => {
                info!("next version: {next}");
                next
            }
            None => {
                info!("next release name not specified: increasing bugfix version by 1");
                let next = version::next_version(&release_version)?;
                info!("new version determined to be {next}");
                next
            }
        };

        let tag_name = release_version.clone();
        let expected_milestone_title = tag_name.clone();

        Ok(Self {
            repo,
            token: params.github_token,
            release_version,
            next_version,
            tag_name,
            expected_milestone_title,
            dry_run: params.dry_run,
            debug: params.debug,
            web_base_url: Url::parse(DEFAULT_WEB_BASE_URL)?,
        })
    }

    /// Link to the closed-milestone view of the milestone with `number`.
    pub fn closed_milestone_url(&self, number: u64) -> Result<Url> {
        let mut url = self.web_base_url.join(&format!(
            "{}/{}/milestone/{number}",
            self.repo.owner, self.repo.name
        ))?;
        url.set_query(Some("closed=1"));
        Ok(url)
    }

    /// Title of the milestone opened for the next release.
    pub fn next_milestone_title(&self) -> String {
        self.expected_milestone_title
            .replace(&self.release_version, &self.next_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(version: &str) -> Result<ReleaseConfig> {
        ReleaseConfig::builder()
            .github_repo("org/repo")
            .github_token(SecretString::from("token"))
            .release_version(version)
            .build()
    }

    #[test]
    fn derives_names_from_release_version() {
        let config = config_for("1.4.2").unwrap();

        assert_eq!(config.repo.owner, "org");
        assert_eq!(config.repo.name, "repo");
        assert_eq!(config.tag_name, "1.4.2");
        assert_eq!(config.expected_milestone_title, "1.4.2");
        assert_eq!(config.next_version, "1.4.3");
        assert_eq!(config.next_milestone_title(), "1.4.3");
        assert!(!config.dry_run);
        assert!(!config.debug);
    }

    #[test]
    fn explicit_next_version_wins_over_derived() {
        let config = ReleaseConfig::builder()
            .github_repo("org/repo")
            .github_token(SecretString::from("token"))
            .release_version("1.4.2")
            .next_version("1.5.0")
            .build()
            .unwrap();

        assert_eq!(config.next_version, "1.5.0");
        assert_eq!(config.next_milestone_title(), "1.5.0");
    }

    #[test]
    fn builds_closed_milestone_url() {
        let config = config_for("1.4.2").unwrap();

        assert_eq!(
            config.closed_milestone_url(17).unwrap().as_str(),
            "https://github.com/org/repo/milestone/17?closed=1"
        );
    }

    #[test]
    fn rejects_invalid_repo_ids() {
        for repo in ["", "repo", "org/", "/repo", "org/repo/extra", "org repo"] {
            let result = ReleaseConfig::builder()
                .github_repo(repo)
                .github_token(SecretString::from("token"))
                .release_version("1.0.0")
                .build();
            assert!(
                matches!(result, Err(ReleaseError::InvalidConfig(_))),
                "expected {repo:?} to be rejected"
            );
        }
    }

    #[test]
    fn accepts_repo_ids_with_punctuation() {
        let repo = RepoId::parse("my-org/repo_name.rs").unwrap();
        assert_eq!(repo.owner, "my-org");
        assert_eq!(repo.name, "repo_name.rs");
        assert_eq!(repo.to_string(), "my-org/repo_name.rs");
    }

    #[test]
    fn rejects_missing_release_version() {
        let result = config_for("  ");
        assert!(matches!(result, Err(ReleaseError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_empty_token() {
        let result = ReleaseConfig::builder()
            .github_repo("org/repo")
            .github_token(SecretString::from(""))
            .release_version("1.4.2")
            .build();
        assert!(matches!(result, Err(ReleaseError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_malformed_release_version() {
        let result = config_for("latest");
        assert!(matches!(result, Err(ReleaseError::InvalidVersion { .. })));
    }

    #[test]
    fn missing_required_builder_field_is_config_error() {
        let result = ReleaseConfig::builder().github_repo("org/repo").build();
        assert!(matches!(result, Err(ReleaseError::InvalidConfig(_))));
    }
}
