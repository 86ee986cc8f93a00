//! Commitreach Library
//!
//! This library provides the core functionality of the commitreach binary:
//! a sequential outreach pipeline over GitHub contributor data, LLM email
//! drafting, campaign memory, and CSV export. It is used by both the main
//! binary and integration tests.

/// Configuration management module
pub mod config;

/// Agent definitions (model + instruction pairings)
pub mod agents;

/// GitHub data access port and REST adapter
pub mod github;

/// LLM provider port and Groq adapter
pub mod llm;

/// Long-term memory port and Mem0 adapter
pub mod memory;

/// Record schemas for one outreach run
pub mod model;

/// Pipeline step implementations
pub mod steps;

/// Telemetry and observability
pub mod telemetry;

/// Sequential workflow runner
pub mod workflow;

/// CLI interface module
pub mod cli;
