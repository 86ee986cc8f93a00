//! Assemble the campaign record and persist it to long-term memory.
//!
//! Two representations are written: a prose summary for retrieval-style
//! queries and a `JSON_DATA:`-prefixed structured snapshot for machine
//! consumption. Writes are fire-and-forget; nothing is read back.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::memory::MemoryStore;
use crate::model::{Campaign, Trigger};
use crate::workflow::{Step, StepId, StepOutput, StepResults, WorkflowError};

pub struct StoreCampaign {
    memory: Arc<dyn MemoryStore>,
}

impl StoreCampaign {
    pub fn new(memory: Arc<dyn MemoryStore>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Step for StoreCampaign {
    fn id(&self) -> StepId {
        StepId::StoreCampaign
    }

    async fn execute(
        &self,
        trigger: &Trigger,
        results: &StepResults,
    ) -> Result<StepOutput, WorkflowError> {
        let campaign = Campaign::assemble(trigger, results.authors(), results.emails())?;

        let statement = render_statement(&campaign);
        self.memory.store(&statement).await?;

        let snapshot = format!("JSON_DATA:{}", serde_json::to_string(&campaign)?);
        self.memory.store(&snapshot).await?;

        info!(campaign = %campaign.metadata.campaign_id, "campaign stored");
        Ok(StepOutput::CampaignStored {
            campaign_id: campaign.metadata.campaign_id,
        })
    }
}

/// Render the prose summary stored alongside the JSON snapshot.
pub fn render_statement(campaign: &Campaign) -> String {
    let recipients = campaign
        .campaign
        .recipients
        .iter()
        .map(|recipient| match &recipient.username {
            Some(username) => {
                format!("- {} ({}) [{}]", recipient.name, recipient.email, username)
            }
            None => format!("- {} ({})", recipient.name, recipient.email),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let emails = campaign
        .campaign
        .emails
        .iter()
        .map(|email| {
            format!(
                "To: {} ({})\nSubject: {}\nBody: {}\n---",
                email.recipient.name, email.recipient.email, email.subject, email.body
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Repository Campaign Information:\n\
         Repository: {}/{}\n\
         Total Authors: {}\n\
         Processed At: {}\n\n\
         Campaign Details:\n\
         Total Emails: {}\n\
         Generated At: {}\n\n\
         Recipients:\n{}\n\n\
         Generated Emails:\n{}\n\n\
         Statistics:\n\
         Average Email Length: {:.1} characters\n\
         Unique Domains: {}\n\n\
         Metadata:\n\
         Campaign ID: {}\n\
         Status: {}\n\
         Last Updated: {}",
        campaign.repository.owner,
        campaign.repository.name,
        campaign.repository.total_authors,
        campaign.repository.processed_at,
        campaign.campaign.total_emails,
        campaign.campaign.generated_at,
        recipients,
        emails,
        campaign.stats.average_email_length,
        campaign.stats.unique_domains.join(", "),
        campaign.metadata.campaign_id,
        campaign.metadata.status,
        campaign.metadata.last_updated,
    )
}
