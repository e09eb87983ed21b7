//! Error types for release-milestone.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for release-milestone operations.
#[derive(Error, Debug)]
pub enum ReleaseError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "Could not determine version pattern of '{version}'. Supported version pattern is {pattern}"
    )]
    InvalidVersion { version: String, pattern: String },

    // Forge errors
    #[error(
        "Milestone not found! Searched for milestone with name '{0}'"
    )]
    MilestoneNotFound(String),

    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    // Interactive prompt errors
    #[error("Input closed while waiting for an answer to: {0}")]
    PromptClosed(String),

    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using ReleaseError
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid version error for the given input and pattern
    pub fn invalid_version(
        version: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            pattern: pattern.into(),
        }
    }
}

// Wraps in Other variant for generic I/O errors
impl From<std::io::Error> for ReleaseError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

impl From<octocrab::Error> for ReleaseError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            octocrab::Error::GitHub { source, .. }
                if source.status_code == StatusCode::UNAUTHORIZED =>
            {
                Self::AuthenticationError(source.message.clone())
            }
            // 403 with a valid token means missing permissions
            octocrab::Error::GitHub { source, .. } => Self::ForgeError(format!(
                "GitHub API error ({}): {}",
                source.status_code, source.message
            )),
            // everything else failed before GitHub answered
            _ => Self::NetworkError(err.to_string()),
        }
    }
}
