//! GitHub data access.
//!
//! Defines the [`GithubClient`] port plus the wire-independent record types
//! the pipeline consumes. Expected conditions (missing user or repository)
//! are typed error variants the caller can branch on; only transport and
//! decoding problems are opaque. The REST implementation lives in [`rest`].

use async_trait::async_trait;

pub mod rest;

pub use rest::RestGithubClient;

/// Errors that can occur while talking to GitHub
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Commit authorship as recorded in git plus the GitHub account, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    /// GitHub login; absent when the commit email is not linked to an account
    pub username: Option<String>,
}

/// One commit from the repository history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub author: CommitAuthor,
    pub date: String,
}

/// A repository in a user's listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSummary {
    pub name: String,
    pub description: String,
    pub url: String,
}

/// A GitHub user profile with their repository list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub bio: String,
    pub email: String,
    pub location: String,
    pub company: String,
    pub website: String,
    pub twitter_username: String,
    pub avatar_url: String,
    pub url: String,
    pub repositories: Vec<RepoSummary>,
}

/// Repository facts for the summary command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
}

/// An open issue, without its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub author: String,
}

/// An open pull request, without its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub author: String,
}

/// GitHub client trait implemented by the REST adapter and by test fakes
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Fetch a user profile together with their repository list.
    async fn get_user(&self, username: &str) -> Result<UserProfile, GithubError>;

    /// List commits on the repository's default branch.
    async fn list_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitInfo>, GithubError>;

    /// Fetch repository facts (description, stars, open issue count).
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, GithubError>;

    /// List open issues, excluding pull requests.
    async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<IssueSummary>, GithubError>;

    /// List open pull requests.
    async fn list_pulls(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequestSummary>, GithubError>;

    /// Fetch the repository README as raw text.
    async fn get_readme(&self, owner: &str, repo: &str) -> Result<String, GithubError>;
}
