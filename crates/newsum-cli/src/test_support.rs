use std::sync::{Arc, Mutex};

use newsum_core::ai::AiProvider;
use newsum_core::{AppConfig, ArticleFetcher, Error, Pipeline, Result, Summarizer};

/// Provider that records prompts and replies with a canned answer
pub struct FakeProvider {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl AiProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(Error::AiProvider)
    }
}

pub fn pipeline_with(provider: Arc<FakeProvider>) -> Pipeline {
    let fetcher = ArticleFetcher::new(&AppConfig::default()).unwrap();
    Pipeline::from_parts(fetcher, Summarizer::with_provider(provider))
}
