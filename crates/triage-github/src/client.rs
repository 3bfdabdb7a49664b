//! GitHub REST issue publisher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use triage_core::defaults::GITHUB_API_VERSION;
use triage_core::{logging, Error, IssueRequest, IssueResult, IssueTracker, Result};

use crate::config::GitHubConfig;
use crate::error::{to_publish_error, IssueErrorCode};

/// Creates issues in one GitHub repository.
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

#[derive(Deserialize)]
struct CreatedIssue {
    html_url: Option<String>,
    number: Option<u64>,
}

#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

impl GitHubClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("triage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing GitHub publisher: url={}, repo={}/{}",
            config.api_url, config.owner, config.repo
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GitHubConfig::from_env()?)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Publish(format!(
                "GitHub request timed out after {}s",
                self.config.timeout_seconds
            ))
        } else {
            Error::Publish(format!("GitHub request failed: {}", e))
        }
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn create_issue(&self, request: &IssueRequest) -> Result<IssueResult> {
        debug!(
            "Creating issue in {}: title_len={}, labels={:?}",
            self.target(),
            request.title.len(),
            request.labels
        );

        let response = self
            .client
            .post(self.config.issues_url())
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GitHubErrorBody>(&text)
                .map(|b| b.message)
                .unwrap_or_default();
            let code = IssueErrorCode::from_status(status.as_u16());
            return Err(to_publish_error(code, status.as_u16(), &message));
        }

        let created: CreatedIssue = response
            .json()
            .await
            .map_err(|e| Error::Publish(format!("Failed to parse GitHub response: {}", e)))?;

        let url = created
            .html_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::Publish("GitHub response is missing html_url".to_string()))?;

        info!(
            { logging::SUBSYSTEM } = "github",
            { logging::OPERATION } = "create_issue",
            { logging::ISSUE_URL } = %url,
            number = ?created.number,
            "Issue created"
        );
        Ok(IssueResult { url })
    }

    fn target(&self) -> String {
        format!("{}/{}", self.config.owner, self.config.repo)
    }
}
