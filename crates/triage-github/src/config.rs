//! GitHub repository and credential configuration.

use std::fmt;

use triage_core::defaults::{
    ENV_GITHUB_API_URL, ENV_GITHUB_OWNER, ENV_GITHUB_REPO, ENV_GITHUB_TIMEOUT_SECS,
    ENV_GITHUB_TOKEN, GITHUB_API_URL, GITHUB_TIMEOUT_SECS,
};
use triage_core::{env, Result};

/// Configuration for the repository issues are filed in.
#[derive(Clone)]
pub struct GitHubConfig {
    /// Base URL of the REST API.
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    /// Token sent as a bearer credential.
    pub token: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl GitHubConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: GITHUB_API_URL.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
            timeout_seconds: GITHUB_TIMEOUT_SECS,
        }
    }

    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: env::optional(ENV_GITHUB_API_URL).unwrap_or_else(|| GITHUB_API_URL.to_string()),
            owner: env::required(ENV_GITHUB_OWNER)?,
            repo: env::required(ENV_GITHUB_REPO)?,
            token: env::required(ENV_GITHUB_TOKEN)?,
            timeout_seconds: env::parsed_or(ENV_GITHUB_TIMEOUT_SECS, GITHUB_TIMEOUT_SECS)?,
        })
    }

    /// Create-issue endpoint for the configured repository.
    pub fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
