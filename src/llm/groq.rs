use super::{CompletionRequest, LlmError, LlmProvider};
use async_trait::async_trait;
use serde_json::json;

/// Groq chat-completions provider.
///
/// Groq exposes the OpenAI-compatible `/chat/completions` endpoint; the
/// system instruction and user prompt are sent as two messages and the
/// first choice's content is returned verbatim.
pub struct GroqProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> super::Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(LlmError::AuthenticationFailed(text));
            } else if status.as_u16() == 429 {
                return Err(LlmError::RateLimitExceeded);
            } else {
                return Err(LlmError::InvalidRequest(text));
            }
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        let choice = data
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .ok_or_else(|| LlmError::ParseError("No choices in response".to_string()))?;

        let content = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| LlmError::ParseError("Empty content".to_string()))?;

        Ok(content.to_string())
    }
}
