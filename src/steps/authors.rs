//! Fetch commits and reduce them to unique outreach recipients.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::github::{CommitInfo, GithubClient};
use crate::model::{Author, Trigger};
use crate::workflow::{Step, StepId, StepOutput, StepResults, WorkflowError};

/// Marker substring of GitHub no-reply addresses, including the
/// `<id>+<login>@` prefixed form.
pub const GITHUB_NOREPLY_MARKER: &str = "@users.noreply.github.com";

pub struct FetchAuthors {
    github: Arc<dyn GithubClient>,
}

impl FetchAuthors {
    pub fn new(github: Arc<dyn GithubClient>) -> Self {
        Self { github }
    }
}

#[async_trait]
impl Step for FetchAuthors {
    fn id(&self) -> StepId {
        StepId::FetchAuthors
    }

    async fn execute(
        &self,
        trigger: &Trigger,
        _results: &StepResults,
    ) -> Result<StepOutput, WorkflowError> {
        let commits = self
            .github
            .list_commits(&trigger.owner, &trigger.repo)
            .await?;
        let authors = unique_authors(&commits);

        info!(
            owner = %trigger.owner,
            repo = %trigger.repo,
            commits = commits.len(),
            authors = authors.len(),
            "collected unique authors"
        );
        Ok(StepOutput::Authors(authors))
    }
}

/// Collapse commits to one author per distinct email.
///
/// Emails that are empty or GitHub no-reply addresses are skipped entirely.
/// A repeated email keeps its first-seen position in the output but takes
/// the last commit's name and username; earlier values for the same email
/// are discarded (last write wins).
pub fn unique_authors(commits: &[CommitInfo]) -> Vec<Author> {
    let mut authors: Vec<Author> = Vec::new();
    let mut index_by_email: HashMap<&str, usize> = HashMap::new();

    for commit in commits {
        let email = commit.author.email.as_str();
        if email.is_empty() || email.contains(GITHUB_NOREPLY_MARKER) {
            continue;
        }

        let author = Author {
            name: commit.author.name.clone(),
            email: email.to_string(),
            username: commit.author.username.clone(),
        };

        match index_by_email.get(email) {
            Some(&index) => authors[index] = author,
            None => {
                index_by_email.insert(email, authors.len());
                authors.push(author);
            }
        }
    }

    authors
}
