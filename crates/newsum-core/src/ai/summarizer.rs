use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::providers::{AiProvider, ClaudeApiProvider, GeminiApiProvider, OpenAiProvider};
use crate::config::AppConfig;
use crate::Result;

/// Sampling temperature used for every summary request
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

const PROMPT_PREFIX: &str = "Summarize the following news article:\n\n";
const PROMPT_SUFFIX: &str = "\n\nSummary:";

/// Render article text into the summarization prompt
pub fn render_prompt(article: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_PREFIX.len() + article.len() + PROMPT_SUFFIX.len());
    prompt.push_str(PROMPT_PREFIX);
    prompt.push_str(article);
    prompt.push_str(PROMPT_SUFFIX);
    prompt
}

fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Generated summary text, exactly as the provider returned it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary(String);

impl Summary {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// AI Summarizer that wraps the configured provider
pub struct Summarizer {
    provider: Arc<dyn AiProvider>,
    max_article_chars: usize,
}

impl Summarizer {
    /// Create a new summarizer based on configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let ai = &config.ai;
        let timeout = Duration::from_secs(ai.request_timeout_secs.max(1));

        let provider: Arc<dyn AiProvider> = match ai.provider.as_str() {
            "gemini_api" => {
                let api_key = ai.gemini_api_key.as_ref()
                    .ok_or_else(|| crate::Error::Config("Gemini API key not configured (set GOOGLE_API_KEY)".to_string()))?;
                Arc::new(GeminiApiProvider::new(
                    api_key,
                    &ai.gemini_model,
                    &ai.gemini_base_url,
                    SUMMARY_TEMPERATURE,
                    timeout,
                )?)
            }
            "openai" => {
                let api_key = ai.openai_api_key.as_ref()
                    .ok_or_else(|| crate::Error::Config("OpenAI API key not configured (set OPENAI_API_KEY)".to_string()))?;
                Arc::new(OpenAiProvider::new(
                    api_key,
                    &ai.openai_model,
                    ai.openai_base_url.as_deref(),
                    SUMMARY_TEMPERATURE,
                    timeout,
                )?)
            }
            "claude_api" => {
                let api_key = ai.claude_api_key.as_ref()
                    .ok_or_else(|| crate::Error::Config("Claude API key not configured (set ANTHROPIC_API_KEY)".to_string()))?;
                Arc::new(ClaudeApiProvider::new(
                    api_key,
                    &ai.claude_model,
                    &ai.claude_base_url,
                    SUMMARY_TEMPERATURE,
                    timeout,
                )?)
            }
            other => {
                return Err(crate::Error::Config(format!(
                    "Unknown AI provider '{}' (expected gemini_api, openai or claude_api)",
                    other
                )));
            }
        };

        tracing::debug!(provider = provider.name(), model = provider.model(), "Summarizer ready");

        Ok(Self::with_provider(provider).max_article_chars(ai.max_article_chars))
    }

    /// Create a summarizer around an existing provider
    pub fn with_provider(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            provider,
            max_article_chars: 0,
        }
    }

    /// Truncate articles longer than `limit` characters before prompting (0 disables)
    pub fn max_article_chars(mut self, limit: usize) -> Self {
        self.max_article_chars = limit;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Generate a summary for article text
    ///
    /// Empty text is still submitted. Provider failures are returned as-is.
    pub async fn summarize(&self, article: &str) -> Result<Summary> {
        let article = if self.max_article_chars > 0 {
            let truncated = truncate_chars(article, self.max_article_chars);
            if truncated.len() < article.len() {
                tracing::info!(limit = self.max_article_chars, "Article truncated before summarizing");
            }
            truncated
        } else {
            article
        };

        let prompt = render_prompt(article);

        tracing::info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            prompt_chars = prompt.chars().count(),
            "Requesting summary"
        );

        let text = self.provider.generate(&prompt).await?;
        Ok(Summary(text))
    }
}
