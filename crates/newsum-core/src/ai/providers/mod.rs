mod claude_api;
mod gemini_api;
mod openai;

pub use claude_api::ClaudeApiProvider;
pub use gemini_api::GeminiApiProvider;
pub use openai::OpenAiProvider;

use crate::Result;

/// Trait for hosted text-generation services
///
/// A provider is an opaque text-in/text-out endpoint. Sampling settings are
/// fixed when the provider is constructed.
#[async_trait::async_trait]
pub trait AiProvider: Send + Sync {
    /// Short provider identifier, e.g. "gemini_api"
    fn name(&self) -> &str;

    /// Model identifier sent with every request
    fn model(&self) -> &str;

    /// Submit `prompt` and return the generated text verbatim
    async fn generate(&self, prompt: &str) -> Result<String>;
}
