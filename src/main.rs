// Commitreach
// Main entry point: composition root and command dispatch.

use std::sync::Arc;

use clap::Parser;

use commitreach::agents::{email_editor, email_writer};
use commitreach::cli::{Cli, Command};
use commitreach::config::{Config, Credentials};
use commitreach::github::{GithubClient, GithubError, RestGithubClient};
use commitreach::llm::{GroqProvider, LlmProvider};
use commitreach::memory::{Mem0Client, MemoryStore};
use commitreach::model::Trigger;
use commitreach::steps::{draft_email, FetchAuthors, GenerateEmails, StoreCampaign, WriteCsv};
use commitreach::telemetry;
use commitreach::workflow::{RunState, Workflow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // --log beats the config level; RUST_LOG beats both.
    let level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    telemetry::init(level);

    // The GitHub token must exist before any adapter is constructed.
    let credentials = Credentials::from_env()?;
    let github: Arc<dyn GithubClient> = Arc::new(RestGithubClient::new(
        config.github.base_url.clone(),
        credentials.github_token.clone(),
    ));

    match cli.command {
        Command::Run {
            owner,
            repo,
            no_memory,
        } => {
            tracing::info!(%owner, %repo, "starting outreach campaign");

            let provider: Arc<dyn LlmProvider> = Arc::new(GroqProvider::new(
                config.llm.base_url.clone(),
                credentials.require_groq()?.to_string(),
            ));
            let writer = email_writer(&config.llm.model, provider.clone());
            let editor = email_editor(&config.llm.model, provider);

            let mut workflow = Workflow::new("outreach-campaign")
                .then(FetchAuthors::new(github))
                .then(GenerateEmails::new(writer, editor, config.campaign.clone()));

            if !no_memory {
                let memory: Arc<dyn MemoryStore> = Arc::new(Mem0Client::new(
                    config.memory.base_url.clone(),
                    credentials.require_mem0()?.to_string(),
                    config.memory.user_id.clone(),
                ));
                workflow = workflow.then(StoreCampaign::new(memory));
            }

            let workflow = workflow.then(WriteCsv::new(config.output.dir.clone()));
            let outcome = workflow.run(Trigger::new(owner, repo)).await;

            match outcome.state {
                RunState::Completed => {
                    println!("Authors found:    {}", outcome.results.authors().len());
                    println!("Emails generated: {}", outcome.results.emails().len());
                    if let Some(campaign_id) = outcome.results.campaign_id() {
                        println!("Campaign id:      {campaign_id}");
                    }
                    if let Some(path) = outcome.results.csv_path() {
                        println!("CSV written to:   {}", path.display());
                    }
                    Ok(())
                }
                RunState::Failed { step, error } => {
                    anyhow::bail!("workflow failed at step {step}: {error}")
                }
                state => anyhow::bail!("workflow ended in non-terminal state {state:?}"),
            }
        }

        Command::Draft { address } => {
            let provider: Arc<dyn LlmProvider> = Arc::new(GroqProvider::new(
                config.llm.base_url.clone(),
                credentials.require_groq()?.to_string(),
            ));
            let writer = email_writer(&config.llm.model, provider.clone());
            let editor = email_editor(&config.llm.model, provider);

            let report = draft_email(&writer, &editor, &address).await?;
            println!("{}", report.copy);
            Ok(())
        }

        Command::Recall { question } => {
            let memory = Mem0Client::new(
                config.memory.base_url.clone(),
                credentials.require_mem0()?.to_string(),
                config.memory.user_id.clone(),
            );

            let answer = memory.search(&question).await?;
            if answer.is_empty() {
                println!("No memories found.");
            } else {
                println!("{answer}");
            }
            Ok(())
        }

        Command::Profile { username } => {
            let profile = github.get_user(&username).await?;

            println!("{} ({})", profile.username, profile.url);
            if !profile.bio.is_empty() {
                println!("  {}", profile.bio);
            }
            println!(
                "  followers: {}  following: {}  public repos: {}",
                profile.followers, profile.following, profile.public_repos
            );
            for field in [
                ("email", &profile.email),
                ("location", &profile.location),
                ("company", &profile.company),
                ("website", &profile.website),
                ("twitter", &profile.twitter_username),
            ] {
                if !field.1.is_empty() {
                    println!("  {}: {}", field.0, field.1);
                }
            }
            if !profile.repositories.is_empty() {
                println!("  repositories:");
                for repo in profile.repositories.iter().take(10) {
                    if repo.description.is_empty() {
                        println!("    {} - {}", repo.name, repo.url);
                    } else {
                        println!("    {} - {} ({})", repo.name, repo.description, repo.url);
                    }
                }
            }
            Ok(())
        }

        Command::Repo { owner, repo } => {
            let repository = github.get_repository(&owner, &repo).await?;
            let issues = github.list_issues(&owner, &repo).await?;
            let pulls = github.list_pulls(&owner, &repo).await?;

            // A repository without a README is expected, not an error.
            let readme = match github.get_readme(&owner, &repo).await {
                Ok(text) => Some(text),
                Err(GithubError::NotFound(_)) => None,
                Err(error) => return Err(error.into()),
            };

            println!("{} ({})", repository.full_name, repository.url);
            if !repository.description.is_empty() {
                println!("  {}", repository.description);
            }
            println!(
                "  stars: {}  forks: {}  open issues: {}",
                repository.stars, repository.forks, repository.open_issues
            );
            if !issues.is_empty() {
                println!("  recent open issues:");
                for issue in &issues {
                    println!("    #{} {} ({})", issue.number, issue.title, issue.author);
                }
            }
            if !pulls.is_empty() {
                println!("  open pull requests:");
                for pull in &pulls {
                    println!("    #{} {} ({})", pull.number, pull.title, pull.author);
                }
            }
            if let Some(readme) = readme {
                println!("  readme:");
                for line in readme.lines().take(12) {
                    println!("    {line}");
                }
            }
            Ok(())
        }
    }
}
