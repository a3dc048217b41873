use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::AiProvider;
use crate::{Error, Result};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Option<Vec<ClaudeContent>>,
    error: Option<ClaudeError>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ClaudeError {
    message: String,
}

/// Claude/Anthropic API provider
pub struct ClaudeApiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl ClaudeApiProvider {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature,
        })
    }
}

#[async_trait::async_trait]
impl AiProvider for ClaudeApiProvider {
    fn name(&self) -> &str {
        "claude_api"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: self.temperature,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::AiProvider(format!("Claude API request failed: {}", e)))?;

        let status = response.status();
        let claude_response: ClaudeResponse = response.json().await.map_err(|e| {
            Error::AiProvider(format!("Failed to parse Claude response (HTTP {}): {}", status, e))
        })?;

        if let Some(error) = claude_response.error {
            return Err(Error::AiProvider(format!("Claude API error: {}", error.message)));
        }

        let content = claude_response
            .content
            .map(|blocks| blocks.into_iter().map(|b| b.text).collect::<String>())
            .ok_or_else(|| Error::AiProvider("Claude response contained no content".to_string()))?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> ClaudeApiProvider {
        ClaudeApiProvider::new("sk-test", "claude-test", &server.uri(), 0.7, Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_generate_posts_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "sk-test"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({
                "model": "claude-test",
                "temperature": 0.7,
                "messages": [{ "role": "user", "content": "Summarize this" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "message",
                "content": [{ "type": "text", "text": "A summary." }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider(&server).generate("Summarize this").await.unwrap();
        assert_eq!(text, "A summary.");
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": { "type": "authentication_error", "message": "invalid x-api-key" }
            })))
            .mount(&server)
            .await;

        let err = provider(&server).generate("x").await.unwrap_err();
        assert_eq!(err.to_string(), "AI provider error: Claude API error: invalid x-api-key");
    }
}
