//! REST adapter for the [`GithubClient`] port.
//!
//! Thin typed wrappers over `api.github.com`. Each method deserializes the
//! wire shape into a private `Api*` struct and maps it into the port types;
//! nothing outside this file sees GitHub's field names.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{
    CommitAuthor, CommitInfo, GithubClient, GithubError, IssueSummary, PullRequestSummary,
    RepoSummary, Repository, UserProfile,
};

const USER_AGENT: &str = concat!("commitreach/", env!("CARGO_PKG_VERSION"));

pub struct RestGithubClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl RestGithubClient {
    /// Create a client against the given API base (normally
    /// `https://api.github.com`) using a personal access token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn request(&self, path: &str, accept: &str) -> Result<reqwest::Response, GithubError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", accept)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| GithubError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(GithubError::AuthenticationFailed(text)),
            404 => Err(GithubError::NotFound(path.to_string())),
            429 => Err(GithubError::RateLimitExceeded),
            _ => Err(GithubError::UnexpectedResponse(text)),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GithubError> {
        self.request(path, "application/vnd.github+json")
            .await?
            .json::<T>()
            .await
            .map_err(|e| GithubError::UnexpectedResponse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ApiUser {
    login: String,
    followers: u64,
    following: u64,
    public_repos: u64,
    bio: Option<String>,
    email: Option<String>,
    location: Option<String>,
    company: Option<String>,
    blog: Option<String>,
    twitter_username: Option<String>,
    avatar_url: String,
    url: String,
}

#[derive(Deserialize)]
struct ApiRepoListing {
    name: String,
    description: Option<String>,
    html_url: String,
}

#[derive(Deserialize)]
struct ApiRepository {
    name: String,
    full_name: String,
    description: Option<String>,
    html_url: String,
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
}

#[derive(Deserialize)]
struct ApiActor {
    login: String,
}

#[derive(Deserialize)]
struct ApiGitAuthor {
    name: Option<String>,
    email: Option<String>,
    date: Option<String>,
}

#[derive(Deserialize)]
struct ApiCommitDetail {
    author: Option<ApiGitAuthor>,
}

#[derive(Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetail,
    author: Option<ApiActor>,
}

#[derive(Deserialize)]
struct ApiIssue {
    number: u64,
    title: String,
    state: String,
    user: ApiActor,
    // Present when the "issue" is actually a pull request.
    pull_request: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiPull {
    number: u64,
    title: String,
    state: String,
    user: ApiActor,
}

// ---------------------------------------------------------------------------

#[async_trait]
impl GithubClient for RestGithubClient {
    async fn get_user(&self, username: &str) -> Result<UserProfile, GithubError> {
        let user: ApiUser = self.get_json(&format!("/users/{username}")).await?;
        let repos: Vec<ApiRepoListing> = self
            .get_json(&format!("/users/{username}/repos?per_page=100"))
            .await?;

        Ok(UserProfile {
            username: user.login,
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            bio: user.bio.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            location: user.location.unwrap_or_default(),
            company: user.company.unwrap_or_default(),
            website: user.blog.clone().unwrap_or_default(),
            twitter_username: user.twitter_username.unwrap_or_default(),
            avatar_url: user.avatar_url,
            url: user.url,
            repositories: repos
                .into_iter()
                .map(|repo| RepoSummary {
                    name: repo.name,
                    description: repo.description.unwrap_or_default(),
                    url: repo.html_url,
                })
                .collect(),
        })
    }

    async fn list_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitInfo>, GithubError> {
        let commits: Vec<ApiCommit> = self
            .get_json(&format!("/repos/{owner}/{repo}/commits?per_page=100"))
            .await?;

        Ok(commits
            .into_iter()
            .map(|commit| {
                let git_author = commit.commit.author.unwrap_or(ApiGitAuthor {
                    name: None,
                    email: None,
                    date: None,
                });
                CommitInfo {
                    sha: commit.sha,
                    author: CommitAuthor {
                        name: git_author.name.unwrap_or_default(),
                        email: git_author.email.unwrap_or_default(),
                        username: commit.author.map(|actor| actor.login),
                    },
                    date: git_author.date.unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, GithubError> {
        let repository: ApiRepository = self.get_json(&format!("/repos/{owner}/{repo}")).await?;

        Ok(Repository {
            name: repository.name,
            full_name: repository.full_name,
            description: repository.description.unwrap_or_default(),
            url: repository.html_url,
            stars: repository.stargazers_count,
            forks: repository.forks_count,
            open_issues: repository.open_issues_count,
        })
    }

    async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<IssueSummary>, GithubError> {
        // The issues endpoint also returns pull requests; drop those.
        let issues: Vec<ApiIssue> = self
            .get_json(&format!("/repos/{owner}/{repo}/issues?state=open&per_page=20"))
            .await?;

        Ok(issues
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .map(|issue| IssueSummary {
                number: issue.number,
                title: issue.title,
                state: issue.state,
                author: issue.user.login,
            })
            .collect())
    }

    async fn list_pulls(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequestSummary>, GithubError> {
        let pulls: Vec<ApiPull> = self
            .get_json(&format!("/repos/{owner}/{repo}/pulls?state=open&per_page=20"))
            .await?;

        Ok(pulls
            .into_iter()
            .map(|pull| PullRequestSummary {
                number: pull.number,
                title: pull.title,
                state: pull.state,
                author: pull.user.login,
            })
            .collect())
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<String, GithubError> {
        // The raw media type returns the file body directly, no base64 step.
        let response = self
            .request(
                &format!("/repos/{owner}/{repo}/readme"),
                "application/vnd.github.raw",
            )
            .await?;

        response
            .text()
            .await
            .map_err(|e| GithubError::UnexpectedResponse(e.to_string()))
    }
}
