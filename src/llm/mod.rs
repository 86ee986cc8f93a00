//! LLM Provider Abstraction Layer
//!
//! This module provides a common interface for text generation. The
//! [`LlmProvider`] trait defines the contract a provider must implement;
//! the production implementation targets Groq's OpenAI-compatible API.
//! Agents and pipeline steps depend only on the trait, so tests substitute
//! scripted fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod groq;

pub use groq::GroqProvider;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// A single completion request: which model, how to behave, what to answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier understood by the provider
    pub model: String,

    /// System instruction establishing the agent's role
    pub system: String,

    /// User prompt for this call
    pub prompt: String,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            prompt: prompt.into(),
        }
    }
}

/// LLM provider trait that all providers must implement
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "groq")
    fn name(&self) -> &str;

    /// Generate text for the given request.
    ///
    /// # Returns
    /// * `Ok(String)` - The generated text, unmodified
    /// * `Err(LlmError)` - If the request fails
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
