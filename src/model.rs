//! Record schemas for one outreach run.
//!
//! These are the data shapes that flow between pipeline steps and into the
//! campaign memory snapshot. The snapshot is serialized with camelCase field
//! names so stored records keep a stable, language-neutral shape.

use std::collections::BTreeSet;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The input payload that starts one workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Repository owner (user or organisation)
    pub owner: String,

    /// Repository name
    pub repo: String,
}

impl Trigger {
    /// Create a trigger from owner and repository name.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Check that both fields are present and non-empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.owner.trim().is_empty() {
            return Err("trigger field 'owner' must not be empty".to_string());
        }
        if self.repo.trim().is_empty() {
            return Err("trigger field 'repo' must not be empty".to_string());
        }
        Ok(())
    }
}

/// A unique commit contributor, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A drafted outreach message, final after the edit pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

/// Campaign lifecycle status as stored in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Completed,
    Failed,
    InProgress,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignStatus::Completed => write!(f, "completed"),
            CampaignStatus::Failed => write!(f, "failed"),
            CampaignStatus::InProgress => write!(f, "in_progress"),
        }
    }
}

/// Repository facts captured at assembly time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub owner: String,
    pub name: String,
    pub total_authors: usize,
    pub processed_at: String,
}

/// One generated email with its recipient, as stored in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    pub recipient: Author,
    pub subject: String,
    pub body: String,
    pub generated_at: String,
}

/// The generated-email section of the campaign record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetails {
    pub total_emails: usize,
    pub recipients: Vec<Author>,
    pub emails: Vec<EmailRecord>,
    pub generated_at: String,
    pub all_email_bodies: Vec<String>,
}

/// Aggregate statistics over the generated emails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStats {
    pub total_authors: usize,
    pub total_emails: usize,
    pub average_email_length: f64,
    pub generated_at: String,
    pub unique_domains: Vec<String>,
}

/// The original query that produced this campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    pub owner: String,
    pub repo: String,
    pub timestamp: String,
}

/// Identification and lifecycle metadata for a campaign record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMetadata {
    pub campaign_id: String,
    pub status: CampaignStatus,
    pub last_updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryRecord>,
}

/// Errors detected while assembling a campaign record.
///
/// Assembly failure aborts the run before anything is persisted.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Each email must correspond to exactly one author.
    #[error("campaign has {emails} emails for {authors} authors")]
    MoreEmailsThanAuthors { emails: usize, authors: usize },
}

/// The full record of one outreach run, assembled once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub repository: RepositoryRecord,
    pub campaign: CampaignDetails,
    pub metadata: CampaignMetadata,
    pub stats: CampaignStats,
}

impl Campaign {
    /// Assemble the campaign record from the author and email lists.
    ///
    /// Stats are computed here so the stored counts always equal the list
    /// lengths at assembly time. The campaign id is an
    /// `owner-repo-<unix millis>` composite; uniqueness is bounded by
    /// timestamp resolution.
    pub fn assemble(
        trigger: &Trigger,
        authors: &[Author],
        emails: &[Email],
    ) -> Result<Self, AssemblyError> {
        if emails.len() > authors.len() {
            return Err(AssemblyError::MoreEmailsThanAuthors {
                emails: emails.len(),
                authors: authors.len(),
            });
        }

        let now = Utc::now().to_rfc3339();
        let campaign_id = format!(
            "{}-{}-{}",
            trigger.owner,
            trigger.repo,
            Utc::now().timestamp_millis()
        );

        let email_records = emails
            .iter()
            .map(|email| EmailRecord {
                recipient: Author {
                    name: email.name.clone(),
                    email: email.email.clone(),
                    username: authors
                        .iter()
                        .find(|author| author.email == email.email)
                        .and_then(|author| author.username.clone()),
                },
                subject: email.subject.clone(),
                body: email.body.clone(),
                generated_at: now.clone(),
            })
            .collect();

        Ok(Self {
            repository: RepositoryRecord {
                owner: trigger.owner.clone(),
                name: trigger.repo.clone(),
                total_authors: authors.len(),
                processed_at: now.clone(),
            },
            campaign: CampaignDetails {
                total_emails: emails.len(),
                recipients: authors.to_vec(),
                emails: email_records,
                generated_at: now.clone(),
                all_email_bodies: emails.iter().map(|email| email.body.clone()).collect(),
            },
            metadata: CampaignMetadata {
                campaign_id,
                status: CampaignStatus::Completed,
                last_updated: now.clone(),
                query: Some(QueryRecord {
                    owner: trigger.owner.clone(),
                    repo: trigger.repo.clone(),
                    timestamp: now.clone(),
                }),
            },
            stats: CampaignStats {
                total_authors: authors.len(),
                total_emails: emails.len(),
                average_email_length: average_body_length(emails),
                generated_at: now,
                unique_domains: unique_domains(emails),
            },
        })
    }
}

/// Mean body length in characters; 0.0 for an empty campaign.
fn average_body_length(emails: &[Email]) -> f64 {
    if emails.is_empty() {
        return 0.0;
    }
    let total: usize = emails.iter().map(|email| email.body.chars().count()).sum();
    total as f64 / emails.len() as f64
}

/// Distinct recipient domains (the substring after '@'), sorted for
/// deterministic storage.
fn unique_domains(emails: &[Email]) -> Vec<String> {
    emails
        .iter()
        .filter_map(|email| email.email.split_once('@'))
        .map(|(_, domain)| domain.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(name: &str, email: &str) -> Author {
        Author {
            name: name.to_string(),
            email: email.to_string(),
            username: None,
        }
    }

    fn email(name: &str, address: &str, body: &str) -> Email {
        Email {
            name: name.to_string(),
            email: address.to_string(),
            subject: "Subject".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn trigger_validation_rejects_empty_fields() {
        assert!(Trigger::new("octo", "demo").validate().is_ok());
        assert!(Trigger::new("", "demo").validate().is_err());
        assert!(Trigger::new("octo", "  ").validate().is_err());
    }

    #[test]
    fn assemble_counts_match_list_lengths() {
        let trigger = Trigger::new("octo", "demo");
        let authors = vec![author("Alice", "a@x.com"), author("Bob", "b@y.org")];
        let emails = vec![
            email("Alice", "a@x.com", "Hello Alice"),
            email("Bob", "b@y.org", "Hello Bob"),
        ];

        let campaign = Campaign::assemble(&trigger, &authors, &emails).unwrap();

        assert_eq!(campaign.stats.total_authors, 2);
        assert_eq!(campaign.stats.total_authors, campaign.repository.total_authors);
        assert_eq!(campaign.stats.total_authors, campaign.campaign.recipients.len());
        assert_eq!(campaign.stats.total_emails, 2);
        assert_eq!(campaign.stats.total_emails, campaign.campaign.total_emails);
        assert_eq!(campaign.stats.total_emails, campaign.campaign.emails.len());
        assert_eq!(campaign.campaign.all_email_bodies.len(), 2);
    }

    #[test]
    fn assemble_rejects_more_emails_than_authors() {
        let trigger = Trigger::new("octo", "demo");
        let authors = vec![author("Alice", "a@x.com")];
        let emails = vec![
            email("Alice", "a@x.com", "Hello"),
            email("Ghost", "g@z.net", "Hello"),
        ];

        let result = Campaign::assemble(&trigger, &authors, &emails);
        assert!(matches!(
            result,
            Err(AssemblyError::MoreEmailsThanAuthors { emails: 2, authors: 1 })
        ));
    }

    #[test]
    fn assemble_allows_fewer_emails_than_authors() {
        let trigger = Trigger::new("octo", "demo");
        let authors = vec![author("Alice", "a@x.com"), author("Bob", "b@y.org")];
        let emails = vec![email("Alice", "a@x.com", "Hello")];

        let campaign = Campaign::assemble(&trigger, &authors, &emails).unwrap();
        assert_eq!(campaign.stats.total_authors, 2);
        assert_eq!(campaign.stats.total_emails, 1);
    }

    #[test]
    fn average_length_is_mean_of_body_chars() {
        let emails = vec![
            email("A", "a@x.com", "1234"),
            email("B", "b@y.org", "123456"),
        ];
        assert_eq!(average_body_length(&emails), 5.0);
        assert_eq!(average_body_length(&[]), 0.0);
    }

    #[test]
    fn domains_are_distinct_and_sorted() {
        let emails = vec![
            email("A", "a@zeta.com", "x"),
            email("B", "b@alpha.org", "x"),
            email("C", "c@zeta.com", "x"),
        ];
        assert_eq!(unique_domains(&emails), vec!["alpha.org", "zeta.com"]);
    }

    #[test]
    fn recipient_username_is_taken_from_author_list() {
        let trigger = Trigger::new("octo", "demo");
        let authors = vec![Author {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            username: Some("alice-gh".to_string()),
        }];
        let emails = vec![email("Alice", "a@x.com", "Hello")];

        let campaign = Campaign::assemble(&trigger, &authors, &emails).unwrap();
        assert_eq!(
            campaign.campaign.emails[0].recipient.username.as_deref(),
            Some("alice-gh")
        );
    }

    #[test]
    fn snapshot_uses_camel_case_field_names() {
        let trigger = Trigger::new("octo", "demo");
        let campaign = Campaign::assemble(&trigger, &[], &[]).unwrap();

        let json = serde_json::to_string(&campaign).unwrap();
        assert!(json.contains("\"totalAuthors\""));
        assert!(json.contains("\"averageEmailLength\""));
        assert!(json.contains("\"campaignId\""));
        assert!(json.contains("\"status\":\"completed\""));

        let parsed: Campaign = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, campaign);
    }
}
