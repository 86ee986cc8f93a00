use async_trait::async_trait;
use serde_json::json;

use super::{MemoryError, MemoryStore};

/// Mem0 HTTP client.
///
/// All statements are scoped to one `user_id`, which is how Mem0 partitions
/// memories between agents.
pub struct Mem0Client {
    base_url: String,
    api_key: String,
    user_id: String,
    client: reqwest::Client,
}

impl Mem0Client {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            user_id: user_id.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn post(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<reqwest::Response, MemoryError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| MemoryError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(MemoryError::AuthenticationFailed(text)),
            _ => Err(MemoryError::UnexpectedResponse(text)),
        }
    }
}

#[async_trait]
impl MemoryStore for Mem0Client {
    async fn store(&self, statement: &str) -> Result<(), MemoryError> {
        let payload = json!({
            "messages": [ { "role": "user", "content": statement } ],
            "user_id": self.user_id,
        });

        self.post("/v1/memories/", payload).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<String, MemoryError> {
        let payload = json!({
            "query": query,
            "user_id": self.user_id,
        });

        let data: serde_json::Value = self
            .post("/v1/memories/search/", payload)
            .await?
            .json()
            .await
            .map_err(|e| MemoryError::UnexpectedResponse(e.to_string()))?;

        // The API has returned both a bare array and a {"results": [...]}
        // wrapper; accept either.
        let results = data
            .as_array()
            .or_else(|| data.get("results").and_then(|r| r.as_array()))
            .ok_or_else(|| MemoryError::UnexpectedResponse(data.to_string()))?;

        let memories: Vec<&str> = results
            .iter()
            .filter_map(|entry| entry.get("memory").and_then(|m| m.as_str()))
            .collect();

        Ok(memories.join("\n"))
    }
}
