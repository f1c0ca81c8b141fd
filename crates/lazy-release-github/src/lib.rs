//! Synchronous GitHub access for lazy-release.
//!
//! [`GitHubClient`] owns a single-threaded tokio runtime and drives octocrab
//! on it, so callers stay synchronous.

mod client;
mod error;
mod types;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use types::{IssueComment, PullRequest, Release};

pub type Result<T> = std::result::Result<T, GitHubError>;
