//! Draft one outreach email per author.
//!
//! Three LLM calls per author, strictly in sequence: subject, body, then an
//! edit pass over the body. The edit call's instruction contract is
//! formatting and inclusion only; that is prompt-level policy, nothing here
//! verifies it. Any failed call aborts the run, so a partial email list is
//! never emitted.

use async_trait::async_trait;
use tracing::info;

use crate::agents::Agent;
use crate::config::CampaignConfig;
use crate::model::{Author, Email, Trigger};
use crate::workflow::{Step, StepId, StepOutput, StepResults, WorkflowError};

pub struct GenerateEmails {
    writer: Agent,
    editor: Agent,
    campaign: CampaignConfig,
}

impl GenerateEmails {
    pub fn new(writer: Agent, editor: Agent, campaign: CampaignConfig) -> Self {
        Self {
            writer,
            editor,
            campaign,
        }
    }

    fn subject_prompt(&self, author: &Author) -> String {
        format!(
            "Generate a compelling subject line for an email to {} about {}. \
             The subject should be professional and highlight the value \
             proposition. Keep it under 6-12 words.",
            author.name, self.campaign.product_name
        )
    }

    fn body_prompt(&self, author: &Author) -> String {
        let points = self
            .campaign
            .talking_points
            .iter()
            .enumerate()
            .map(|(index, point)| format!("{}. {}", index + 1, point))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Write a personalized email to {} about how {} can enhance their \
             AI applications. Focus on:\n{}\nKeep it professional and concise.",
            author.name, self.campaign.product_name, points
        )
    }

    fn edit_prompt(&self, author: &Author, body: &str) -> String {
        format!(
            "Edit this email to make it more professional and personalized \
             for {}:\n{}\n\n\
             Make sure to include the name of the recipient in the email.\n\
             Make sure to include the company name {} in the email.\n\
             Make sure to include the company website {} in the email.\n\
             Do not use any other words than what is provided in the email.",
            author.name, body, self.campaign.product_name, self.campaign.product_url
        )
    }
}

#[async_trait]
impl Step for GenerateEmails {
    fn id(&self) -> StepId {
        StepId::GenerateEmails
    }

    async fn execute(
        &self,
        _trigger: &Trigger,
        results: &StepResults,
    ) -> Result<StepOutput, WorkflowError> {
        let authors = results.authors();
        let mut emails = Vec::with_capacity(authors.len());

        for author in authors {
            let subject = self.writer.generate(&self.subject_prompt(author)).await?;
            let body = self.writer.generate(&self.body_prompt(author)).await?;
            let edited = self.editor.generate(&self.edit_prompt(author, &body)).await?;

            info!(recipient = %author.email, "drafted email");
            emails.push(Email {
                name: author.name.clone(),
                email: author.email.clone(),
                subject: subject.trim().to_string(),
                body: edited,
            });
        }

        Ok(StepOutput::Emails(emails))
    }
}
