//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{
    ReleaseError, Result,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{
            CreateMilestoneRequest, CreateReleaseRequest, Issue, Milestone,
            Owner, OwnerKind, Release, UpdateMilestoneRequest,
        },
        traits::Forge,
    },
};

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
struct Account {
    pub login: String,
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    pub id: u64,
    pub tag_name: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub html_url: String,
    pub draft: bool,
    pub prerelease: bool,
}

#[derive(Debug, Serialize)]
struct MilestonesQuery {
    pub state: &'static str,
    pub per_page: u8,
    pub page: u32,
}

fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(
        err,
        octocrab::Error::GitHub { source, .. }
            if source.status_code == StatusCode::NOT_FOUND
    )
}

/// GitHub forge implementation using Octocrab for REST calls against
/// milestones, issues and releases.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication.
    /// Fails when the token is rejected or the repository cannot be found.
    pub async fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_base_url();
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .add_retry_config(RetryConfig::None)
            .base_uri(base_uri.clone())?;
        let instance = builder.build()?;

        let github = Self {
            config,
            base_uri,
            instance,
        };

        github.authenticate().await?;
        github.verify_repository().await?;

        Ok(github)
    }

    async fn authenticate(&self) -> Result<()> {
        let endpoint = format!("{}/user", self.base_uri);

        let user: AuthenticatedUser = self
            .instance
            .get(endpoint, None::<&()>)
            .await
            .map_err(|err| {
                error!("authentication error, please try again");
                ReleaseError::AuthenticationError(err.to_string())
            })?;

        info!("authenticated as {}", user.login);

        Ok(())
    }

    async fn verify_repository(&self) -> Result<()> {
        let endpoint =
            format!("{}/repos/{}", self.base_uri, self.config.path());

        let result: std::result::Result<RepositoryInfo, octocrab::Error> =
            self.instance.get(endpoint, None::<&()>).await;

        match result {
            Ok(repo) => {
                debug!("found repository: {}", repo.full_name);
                Ok(())
            }
            Err(err) if is_not_found(&err) => Err(ReleaseError::forge(
                format!("repository not found: {}", self.config.path()),
            )),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_account(
        &self,
        kind: &str,
        name: &str,
    ) -> std::result::Result<Account, octocrab::Error> {
        let endpoint = format!("{}/{kind}/{name}", self.base_uri);
        self.instance.get(endpoint, None::<&()>).await
    }
}

#[async_trait]
impl Forge for Github {
    async fn resolve_owner(&self, name: &str) -> Result<Owner> {
        match self.get_account("orgs", name).await {
            Ok(org) => {
                debug!("organization found: {}", org.login);
                return Ok(Owner {
                    login: org.login,
                    kind: OwnerKind::Organization,
                });
            }
            Err(err) if is_not_found(&err) => {
                debug!(
                    "organization not found: trying to interpret {name} as user"
                );
            }
            Err(err) => return Err(err.into()),
        }

        let user = self.get_account("users", name).await.map_err(|err| {
            if is_not_found(&err) {
                ReleaseError::forge(format!(
                    "no organization or user found for name: {name}"
                ))
            } else {
                err.into()
            }
        })?;

        debug!("user found: {}", user.login);

        Ok(Owner {
            login: user.login,
            kind: OwnerKind::User,
        })
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>> {
        let endpoint =
            format!("{}/repos/{}/milestones", self.base_uri, self.config.path());

        let mut milestones: Vec<Milestone> = vec![];
        let mut page = 1;

        loop {
            let query = MilestonesQuery {
                state: "all",
                per_page: DEFAULT_PAGE_SIZE,
                page,
            };

            let batch: Vec<Milestone> = self
                .instance
                .get(&endpoint, Some(&query))
                .await
                .map_err(|err| {
                    error!("could not retrieve milestones");
                    ReleaseError::from(err)
                })?;

            let count = batch.len();
            milestones.extend(batch);

            if count < DEFAULT_PAGE_SIZE as usize {
                break;
            }

            page += 1;
        }

        Ok(milestones)
    }

    async fn get_issue(&self, number: u64) -> Result<Option<Issue>> {
        let endpoint = format!(
            "{}/repos/{}/issues/{number}",
            self.base_uri,
            self.config.path()
        );

        let result: std::result::Result<Issue, octocrab::Error> =
            self.instance.get(endpoint, None::<&()>).await;

        match result {
            Ok(issue) => Ok(Some(issue)),
            Err(err) if is_not_found(&err) => {
                info!("no issue found for number: {number}");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create_milestone(
        &self,
        req: CreateMilestoneRequest,
    ) -> Result<Milestone> {
        let endpoint =
            format!("{}/repos/{}/milestones", self.base_uri, self.config.path());

        let milestone: Milestone =
            self.instance.post(endpoint, Some(&req)).await?;

        Ok(milestone)
    }

    async fn update_milestone(
        &self,
        req: UpdateMilestoneRequest,
    ) -> Result<Milestone> {
        let endpoint = format!(
            "{}/repos/{}/milestones/{}",
            self.base_uri,
            self.config.path(),
            req.number
        );

        let body = serde_json::json!({
          "title": req.title,
          "state": req.state,
          "description": req.description,
        });

        let milestone: Milestone =
            self.instance.patch(endpoint, Some(&body)).await?;

        Ok(milestone)
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Release> {
        let endpoint =
            format!("{}/repos/{}/releases", self.base_uri, self.config.path());

        let release: GithubRelease = self
            .instance
            .post(endpoint, Some(&req))
            .await
            .map_err(|err| {
                error!("could not create release");
                ReleaseError::from(err)
            })?;

        Ok(Release {
            id: release.id,
            title: release.name.unwrap_or_else(|| release.tag_name.clone()),
            tag: release.tag_name,
            body: release.body.unwrap_or_default(),
            html_url: release.html_url,
            draft: release.draft,
            prerelease: release.prerelease,
        })
    }
}
