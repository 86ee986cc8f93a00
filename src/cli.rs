//! CLI interface for commitreach
//!
//! This module provides the command-line interface using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Contributor outreach pipeline
///
/// Fetches a repository's commit authors, drafts a personalized outreach
/// email per author with an LLM, remembers the campaign, and exports a CSV.
#[derive(Parser, Debug)]
#[command(name = "commitreach")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the outreach campaign pipeline for a repository
    Run {
        /// Repository owner (user or organisation)
        owner: String,

        /// Repository name
        repo: String,

        /// Skip the campaign memory write
        #[arg(long)]
        no_memory: bool,
    },

    /// Draft and edit a single cold email
    Draft {
        /// Recipient email address
        address: String,
    },

    /// Search campaign memory
    Recall {
        /// Question used to look up the answer in saved memories
        question: String,
    },

    /// Show a GitHub user profile
    Profile {
        /// GitHub username
        username: String,
    },

    /// Summarise a repository
    Repo {
        /// Repository owner (user or organisation)
        owner: String,

        /// Repository name
        repo: String,
    },
}
