//! # triage-github
//!
//! Issue publisher for triage, backed by the GitHub REST API.
//!
//! One authenticated `POST /repos/{owner}/{repo}/issues` per report, no
//! retries. Non-success statuses are classified by [`IssueErrorCode`] and
//! surfaced as publish errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use triage_core::{IssueRequest, IssueTracker};
//! use triage_github::GitHubClient;
//!
//! #[tokio::main]
//! async fn main() -> triage_core::Result<()> {
//!     let client = GitHubClient::from_env()?;
//!     let issue = client
//!         .create_issue(&IssueRequest {
//!             title: "[Bug] Crash on save".to_string(),
//!             body: "**Details:**\nIt crashes".to_string(),
//!             labels: vec!["bug".to_string(), "external-report".to_string()],
//!         })
//!         .await?;
//!     println!("{}", issue.url);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use error::IssueErrorCode;
