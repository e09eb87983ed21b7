//! Configuration for the GitHub connection.
use secrecy::SecretString;

use crate::config::ReleaseConfig;

/// Default GitHub host.
pub const DEFAULT_HOST: &str = "github.com";
/// Default URL scheme for API calls.
pub const DEFAULT_SCHEME: &str = "https";
/// Default page size for paginated milestone queries
pub const DEFAULT_PAGE_SIZE: u8 = 100;
/// Description written when closing a milestone that has none.
pub const MISSING_DESCRIPTION_PLACEHOLDER: &str = "Void description error";

/// Remote repository connection configuration for authenticating and
/// interacting with GitHub.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Overrides the API base URL derived from scheme and host.
    pub api_base_url: Option<String>,
}

impl RemoteConfig {
    /// Base URL for REST calls, `https://api.github.com` by default.
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| format!("{}://api.{}", self.scheme, self.host))
    }

    /// `<owner>/<repo>` path used in REST endpoints.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
            api_base_url: None,
        }
    }
}

impl From<&ReleaseConfig> for RemoteConfig {
    fn from(config: &ReleaseConfig) -> Self {
        Self {
            owner: config.repo.owner.clone(),
            repo: config.repo.name.clone(),
            token: config.token.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_from_release_config() {
        let config = ReleaseConfig::builder()
            .github_repo("my-org/my-repo")
            .github_token(SecretString::from("token"))
            .release_version("1.4.2")
            .build()
            .unwrap();

        let remote = RemoteConfig::from(&config);

        assert_eq!(remote.owner, "my-org");
        assert_eq!(remote.repo, "my-repo");
        assert_eq!(remote.token.expose_secret(), "token");
        assert_eq!(remote.path(), "my-org/my-repo");
        assert!(remote.api_base_url.is_none());
        assert_eq!(remote.api_base_url(), "https://api.github.com");
    }

    #[test]
    fn test_default_api_base_url() {
        let remote = RemoteConfig::default();
        assert_eq!(remote.api_base_url(), "https://api.github.com");
    }

    #[test]
    fn test_api_base_url_override() {
        let remote = RemoteConfig {
            api_base_url: Some("http://127.0.0.1:8080".into()),
            owner: "org".into(),
            repo: "repo".into(),
            ..Default::default()
        };
        assert_eq!(remote.api_base_url(), "http://127.0.0.1:8080");
        assert_eq!(remote.path(), "org/repo");
    }
}
