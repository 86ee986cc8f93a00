//! Sequential workflow runner.
//!
//! A workflow is a fixed, ordered list of steps executed one at a time for a
//! single trigger. Each step reads the typed outputs of the steps before it
//! through [`StepResults`] and contributes its own; the runner never
//! reorders, retries, or resumes. A step that fails ends the run as
//! [`RunState::Failed`] with the outputs of completed predecessors intact,
//! so a failure is a value the caller can inspect rather than an unwound
//! error.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::github::GithubError;
use crate::llm::LlmError;
use crate::memory::MemoryError;
use crate::model::{AssemblyError, Author, Email, Trigger};

/// Identifies a step within a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    FetchAuthors,
    GenerateEmails,
    StoreCampaign,
    WriteCsv,
}

impl StepId {
    pub fn as_str(self) -> &'static str {
        match self {
            StepId::FetchAuthors => "fetch-authors",
            StepId::GenerateEmails => "generate-emails",
            StepId::StoreCampaign => "store-campaign",
            StepId::WriteCsv => "write-csv",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed output of a completed step.
#[derive(Debug, Clone)]
pub enum StepOutput {
    Authors(Vec<Author>),
    Emails(Vec<Email>),
    CampaignStored { campaign_id: String },
    CsvWritten { path: PathBuf },
}

/// Write-once map of step outputs accumulated during a run.
///
/// Each key has exactly one writer (the step itself) and is only readable by
/// later steps, so a step can never observe a successor's result. Accessors
/// return empty defaults when the producing step has not run; steps treat a
/// missing predecessor as empty input, not as an error.
#[derive(Debug, Default)]
pub struct StepResults {
    entries: Vec<(StepId, StepOutput)>,
}

impl StepResults {
    fn insert(&mut self, id: StepId, output: StepOutput) {
        self.entries.push((id, output));
    }

    pub fn get(&self, id: StepId) -> Option<&StepOutput> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, output)| output)
    }

    /// Authors collected by the fetch-authors step, empty if it has not run.
    pub fn authors(&self) -> &[Author] {
        match self.get(StepId::FetchAuthors) {
            Some(StepOutput::Authors(authors)) => authors,
            _ => &[],
        }
    }

    /// Emails drafted by the generate-emails step, empty if it has not run.
    pub fn emails(&self) -> &[Email] {
        match self.get(StepId::GenerateEmails) {
            Some(StepOutput::Emails(emails)) => emails,
            _ => &[],
        }
    }

    /// Campaign id persisted by the store-campaign step.
    pub fn campaign_id(&self) -> Option<&str> {
        match self.get(StepId::StoreCampaign) {
            Some(StepOutput::CampaignStored { campaign_id }) => Some(campaign_id),
            _ => None,
        }
    }

    /// Path written by the write-csv step.
    pub fn csv_path(&self) -> Option<&Path> {
        match self.get(StepId::WriteCsv) {
            Some(StepOutput::CsvWritten { path }) => Some(path),
            _ => None,
        }
    }
}

/// Errors that terminate a workflow run
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid trigger: {0}")]
    InvalidTrigger(String),

    #[error(transparent)]
    Github(#[from] GithubError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One named unit of work in a pipeline.
#[async_trait]
pub trait Step: Send + Sync {
    fn id(&self) -> StepId;

    /// Run the step against the trigger and predecessor results.
    ///
    /// An `Err` aborts the whole run; there is no retry.
    async fn execute(
        &self,
        trigger: &Trigger,
        results: &StepResults,
    ) -> Result<StepOutput, WorkflowError>;
}

/// Lifecycle of one workflow run.
///
/// `Pending` and `Running` are the pre-terminal phases surfaced in traces;
/// an outcome always carries `Completed` or `Failed`.
#[derive(Debug)]
pub enum RunState {
    Pending,
    Running(usize),
    Completed,
    Failed { step: usize, error: WorkflowError },
}

/// Terminal state and accumulated results of one run.
#[derive(Debug)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub state: RunState,
    pub results: StepResults,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.state, RunState::Completed)
    }

    /// The failing step index and error, when the run failed.
    pub fn failure(&self) -> Option<(usize, &WorkflowError)> {
        match &self.state {
            RunState::Failed { step, error } => Some((*step, error)),
            _ => None,
        }
    }
}

/// An ordered list of steps executed strictly in sequence for one trigger.
pub struct Workflow {
    name: String,
    steps: Vec<Box<dyn Step>>,
}

impl Workflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step; declaration order is execution order.
    #[must_use]
    pub fn then(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Execute every step in order for one trigger.
    ///
    /// The trigger is validated first; a validation failure is reported as
    /// `Failed` at index 0 without running anything. A failed run must be
    /// restarted from the beginning by the caller.
    pub async fn run(&self, trigger: Trigger) -> RunOutcome {
        let run_id = Uuid::new_v4();
        let mut results = StepResults::default();

        info!(workflow = %self.name, run = %run_id, steps = self.steps.len(), "run pending");

        if let Err(message) = trigger.validate() {
            error!(workflow = %self.name, run = %run_id, %message, "trigger rejected");
            return RunOutcome {
                run_id,
                state: RunState::Failed {
                    step: 0,
                    error: WorkflowError::InvalidTrigger(message),
                },
                results,
            };
        }

        for (index, step) in self.steps.iter().enumerate() {
            info!(workflow = %self.name, run = %run_id, step = %step.id(), index, "running step");

            match step.execute(&trigger, &results).await {
                Ok(output) => results.insert(step.id(), output),
                Err(error) => {
                    error!(
                        workflow = %self.name,
                        run = %run_id,
                        step = %step.id(),
                        %error,
                        "step failed, aborting run"
                    );
                    return RunOutcome {
                        run_id,
                        state: RunState::Failed { step: index, error },
                        results,
                    };
                }
            }
        }

        info!(workflow = %self.name, run = %run_id, "run completed");
        RunOutcome {
            run_id,
            state: RunState::Completed,
            results,
        }
    }
}
