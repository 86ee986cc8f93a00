//! Long-term memory access.
//!
//! Defines the [`MemoryStore`] port: free-text statements go in, remembered
//! text comes back out. The production implementation targets the Mem0 HTTP
//! API (see [`mem0`]); no transactional guarantee is assumed and writes are
//! fire-and-forget with no read-back verification.

use async_trait::async_trait;

pub mod mem0;

pub use mem0::Mem0Client;

/// Errors that can occur during memory operations
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Memory store trait implemented by the Mem0 adapter and by test fakes
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Persist one free-text statement.
    async fn store(&self, statement: &str) -> Result<(), MemoryError>;

    /// Search stored statements and return the remembered text, empty when
    /// nothing matches.
    async fn search(&self, query: &str) -> Result<String, MemoryError>;
}
