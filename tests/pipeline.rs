//! End-to-end campaign pipeline scenarios against fake adapters.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use commitreach::agents::{email_editor, email_writer};
use commitreach::config::CampaignConfig;
use commitreach::github::{
    CommitAuthor, CommitInfo, GithubClient, GithubError, IssueSummary, PullRequestSummary,
    Repository, UserProfile,
};
use commitreach::llm::{CompletionRequest, LlmError, LlmProvider};
use commitreach::memory::{MemoryError, MemoryStore};
use commitreach::model::Trigger;
use commitreach::steps::{FetchAuthors, GenerateEmails, StoreCampaign, WriteCsv};
use commitreach::workflow::{Workflow, WorkflowError};

// ---------------------------------------------------------------------------
// Fake adapters
// ---------------------------------------------------------------------------

struct FakeGithub {
    commits: Vec<CommitInfo>,
}

#[async_trait]
impl GithubClient for FakeGithub {
    async fn get_user(&self, username: &str) -> Result<UserProfile, GithubError> {
        Err(GithubError::NotFound(username.to_string()))
    }

    async fn list_commits(&self, _owner: &str, _repo: &str) -> Result<Vec<CommitInfo>, GithubError> {
        Ok(self.commits.clone())
    }

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, GithubError> {
        Err(GithubError::NotFound(format!("{owner}/{repo}")))
    }

    async fn list_issues(&self, _owner: &str, _repo: &str) -> Result<Vec<IssueSummary>, GithubError> {
        Ok(Vec::new())
    }

    async fn list_pulls(
        &self,
        _owner: &str,
        _repo: &str,
    ) -> Result<Vec<PullRequestSummary>, GithubError> {
        Ok(Vec::new())
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<String, GithubError> {
        Err(GithubError::NotFound(format!("{owner}/{repo}")))
    }
}

/// Pops canned replies in order; an exhausted script fails the call.
struct ScriptedLlm {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<usize>,
}

impl ScriptedLlm {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: Mutex::new(0),
        })
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
        *self.calls.lock().map_err(|e| LlmError::InvalidRequest(e.to_string()))? += 1;
        self.replies
            .lock()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
            .pop_front()
            .ok_or_else(|| LlmError::InvalidRequest("script exhausted".to_string()))
    }
}

struct RecordingMemory {
    statements: Mutex<Vec<String>>,
}

impl RecordingMemory {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            statements: Mutex::new(Vec::new()),
        })
    }

    fn statement_count(&self) -> usize {
        self.statements.lock().unwrap().len()
    }
}

#[async_trait]
impl MemoryStore for RecordingMemory {
    async fn store(&self, statement: &str) -> Result<(), MemoryError> {
        self.statements
            .lock()
            .map_err(|e| MemoryError::UnexpectedResponse(e.to_string()))?
            .push(statement.to_string());
        Ok(())
    }

    async fn search(&self, _query: &str) -> Result<String, MemoryError> {
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------

fn commit(name: &str, email: &str) -> CommitInfo {
    CommitInfo {
        sha: format!("sha-{name}"),
        author: CommitAuthor {
            name: name.to_string(),
            email: email.to_string(),
            username: None,
        },
        date: "2024-05-01T10:00:00Z".to_string(),
    }
}

fn campaign_pipeline(
    commits: Vec<CommitInfo>,
    provider: Arc<ScriptedLlm>,
    memory: Arc<RecordingMemory>,
    output_dir: &Path,
) -> Workflow {
    let writer = email_writer("test-model", provider.clone());
    let editor = email_editor("test-model", provider);

    Workflow::new("outreach-campaign")
        .then(FetchAuthors::new(Arc::new(FakeGithub { commits })))
        .then(GenerateEmails::new(writer, editor, CampaignConfig::default()))
        .then(StoreCampaign::new(memory))
        .then(WriteCsv::new(output_dir))
}

#[tokio::test]
async fn duplicate_email_collapses_to_the_later_author() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedLlm::new(&["Subject", "Body draft", "Body edited"]);
    let memory = RecordingMemory::new();

    let workflow = campaign_pipeline(
        vec![commit("Alice", "a@x.com"), commit("Alice2", "a@x.com")],
        provider.clone(),
        memory.clone(),
        dir.path(),
    );
    let outcome = workflow.run(Trigger::new("octo", "demo")).await;

    assert!(outcome.is_success());
    let authors = outcome.results.authors();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Alice2");
    assert_eq!(authors[0].email, "a@x.com");

    assert_eq!(provider.call_count(), 3);
    assert_eq!(memory.statement_count(), 2);

    let csv = std::fs::read_to_string(outcome.results.csv_path().unwrap()).unwrap();
    assert_eq!(csv, "Name,Email,Subject,Body\nAlice2,a@x.com,Subject,Body edited");
}

#[tokio::test]
async fn all_noreply_commits_yield_a_header_only_csv() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedLlm::new(&[]);
    let memory = RecordingMemory::new();

    let workflow = campaign_pipeline(
        vec![commit("Bot", "u@users.noreply.github.com")],
        provider.clone(),
        memory.clone(),
        dir.path(),
    );
    let outcome = workflow.run(Trigger::new("octo", "demo")).await;

    assert!(outcome.is_success());
    assert!(outcome.results.authors().is_empty());
    assert!(outcome.results.emails().is_empty());
    assert_eq!(provider.call_count(), 0);

    let csv = std::fs::read_to_string(outcome.results.csv_path().unwrap()).unwrap();
    assert_eq!(csv, "Name,Email,Subject,Body\n");
}

#[tokio::test]
async fn llm_failure_mid_run_leaves_no_csv_and_no_memory_record() {
    let dir = tempfile::tempdir().unwrap();
    // The first author completes all three calls; the second author's
    // subject call finds the script exhausted and fails.
    let provider = ScriptedLlm::new(&["s1", "b1", "e1"]);
    let memory = RecordingMemory::new();

    let workflow = campaign_pipeline(
        vec![commit("Alice", "a@x.com"), commit("Bob", "b@y.org")],
        provider,
        memory.clone(),
        dir.path(),
    );
    let outcome = workflow.run(Trigger::new("octo", "demo")).await;

    assert!(!outcome.is_success());
    let (step, error) = outcome.failure().expect("failed outcome");
    assert_eq!(step, 1);
    assert!(matches!(error, WorkflowError::Llm(_)));

    assert_eq!(memory.statement_count(), 0);
    assert!(!dir.path().join("octo-demo-emails.csv").exists());
    assert!(outcome.results.csv_path().is_none());
}

#[tokio::test]
async fn empty_trigger_field_aborts_before_any_adapter_call() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedLlm::new(&[]);
    let memory = RecordingMemory::new();

    let workflow = campaign_pipeline(Vec::new(), provider.clone(), memory.clone(), dir.path());
    let outcome = workflow.run(Trigger::new("octo", "")).await;

    assert!(!outcome.is_success());
    let (step, error) = outcome.failure().expect("failed outcome");
    assert_eq!(step, 0);
    assert!(matches!(error, WorkflowError::InvalidTrigger(_)));
    assert_eq!(provider.call_count(), 0);
    assert_eq!(memory.statement_count(), 0);
}

#[tokio::test]
async fn skipping_the_memory_step_still_writes_the_csv() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedLlm::new(&["Subject", "Body draft", "Body edited"]);
    let writer = email_writer("test-model", provider.clone());
    let editor = email_editor("test-model", provider);

    let workflow = Workflow::new("outreach-campaign")
        .then(FetchAuthors::new(Arc::new(FakeGithub {
            commits: vec![commit("Alice", "a@x.com")],
        })))
        .then(GenerateEmails::new(writer, editor, CampaignConfig::default()))
        .then(WriteCsv::new(dir.path()));

    let outcome = workflow.run(Trigger::new("octo", "demo")).await;

    assert!(outcome.is_success());
    assert!(outcome.results.campaign_id().is_none());
    assert!(outcome.results.csv_path().unwrap().exists());
}
