//! Agents: a named model + instruction pairing over an injected provider.
//!
//! An agent fixes the model identifier and system instructions once; each
//! `generate` call supplies only the per-call prompt. The two campaign agents
//! are the writer (subjects and bodies) and the editor (formatting pass).

use std::sync::Arc;

use tracing::debug;

use crate::llm::{self, CompletionRequest, LlmProvider};

pub struct Agent {
    name: String,
    model: String,
    instructions: String,
    provider: Arc<dyn LlmProvider>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        instructions: impl Into<String>,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            instructions: instructions.into(),
            provider,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generate text for a prompt under this agent's instructions.
    pub async fn generate(&self, prompt: &str) -> llm::Result<String> {
        debug!(agent = %self.name, provider = %self.provider.name(), "generating");
        let request =
            CompletionRequest::new(self.model.clone(), self.instructions.clone(), prompt);
        self.provider.complete(&request).await
    }
}

/// The outreach copywriter: drafts subject lines and email bodies.
pub fn email_writer(model: &str, provider: Arc<dyn LlmProvider>) -> Agent {
    Agent::new(
        "email-writer",
        model,
        "You are an expert outreach copywriter. You write professional, \
         personalized emails to software developers. Return only the \
         requested text with no preamble, no commentary, and no markdown \
         fences.",
        provider,
    )
}

/// The editor: adjusts formatting and inclusion, never invents content.
pub fn email_editor(model: &str, provider: Arc<dyn LlmProvider>) -> Agent {
    Agent::new(
        "email-editor",
        model,
        "You are an email editor. You improve formatting, tone, and \
         structure of the email you are given. You must not add claims or \
         wording that is not already present in the draft or in the editing \
         request. Return only the edited email.",
        provider,
    )
}
