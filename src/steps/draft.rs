//! Single-address draft chain: write a cold email, then edit it.
//!
//! A two-call sequence sharing the campaign agents and error taxonomy, for
//! drafting one email outside the repository pipeline.

use tracing::info;

use crate::agents::Agent;
use crate::workflow::WorkflowError;

/// The edited draft for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftReport {
    pub address: String,
    pub copy: String,
}

/// Write a cold email to `address` with the writer agent, then pass the
/// draft through the editor agent. Either failed call aborts the chain.
pub async fn draft_email(
    writer: &Agent,
    editor: &Agent,
    address: &str,
) -> Result<DraftReport, WorkflowError> {
    if address.trim().is_empty() || !address.contains('@') {
        return Err(WorkflowError::InvalidTrigger(format!(
            "'{address}' is not an email address"
        )));
    }

    let copy = writer
        .generate(&format!(
            "Write a cold email to {address} about how I can be of value to \
             their team and work alongside them to build things."
        ))
        .await?;

    let edited = editor
        .generate(&format!(
            "Edit the following email, returning only the edited copy: {copy}"
        ))
        .await?;

    info!(%address, "draft complete");
    Ok(DraftReport {
        address: address.to_string(),
        copy: edited,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::agents::{email_editor, email_writer};
    use crate::llm::{self, CompletionRequest, LlmError, LlmProvider};

    struct ScriptedLlm {
        replies: Mutex<VecDeque<String>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> llm::Result<String> {
            self.requests
                .lock()
                .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
                .push(request.clone());
            self.replies
                .lock()
                .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
                .pop_front()
                .ok_or_else(|| LlmError::InvalidRequest("script exhausted".to_string()))
        }
    }

    #[tokio::test]
    async fn editor_receives_writer_output_verbatim() {
        let provider = Arc::new(ScriptedLlm {
            replies: Mutex::new(
                ["raw draft text", "polished draft"]
                    .iter()
                    .map(|r| r.to_string())
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        });
        let writer = email_writer("m", provider.clone());
        let editor = email_editor("m", provider.clone());

        let report = draft_email(&writer, &editor, "dev@example.com").await.unwrap();

        assert_eq!(report.copy, "polished draft");
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].prompt.contains("dev@example.com"));
        assert!(requests[1].prompt.contains("raw draft text"));
    }

    #[tokio::test]
    async fn rejects_non_address_input() {
        let provider = Arc::new(ScriptedLlm {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        });
        let writer = email_writer("m", provider.clone());
        let editor = email_editor("m", provider.clone());

        let error = draft_email(&writer, &editor, "not-an-address").await.unwrap_err();
        assert!(matches!(error, WorkflowError::InvalidTrigger(_)));
        assert!(provider.requests.lock().unwrap().is_empty());
    }
}
