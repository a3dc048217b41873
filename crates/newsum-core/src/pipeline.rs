//! Fetch-then-summarize request flow
//!
//! One call handles one user action: validate the URL, extract the article,
//! summarize it. A fetch failure is a displayable outcome. A summarization
//! failure is an error for the caller.

use crate::ai::{Summarizer, Summary};
use crate::article::{ArticleFetcher, ArticleText};
use crate::config::AppConfig;
use crate::{Error, Result};

/// Text shown when the user submits without a URL
pub const MISSING_URL_WARNING: &str = "Please enter a valid URL.";

/// What the user should see after a request
#[derive(Debug)]
pub enum Outcome {
    /// No URL was given; nothing was fetched
    MissingUrl,
    /// The article could not be retrieved; the summarizer was not called
    FetchFailed(Error),
    /// The article was summarized
    Summarized { article: ArticleText, summary: Summary },
}

pub struct Pipeline {
    fetcher: ArticleFetcher,
    summarizer: Summarizer,
}

impl Pipeline {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: ArticleFetcher::new(config)?,
            summarizer: Summarizer::new(config)?,
        })
    }

    pub fn from_parts(fetcher: ArticleFetcher, summarizer: Summarizer) -> Self {
        Self { fetcher, summarizer }
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Run one request
    ///
    /// Returns `Err` only when the summarizer fails.
    pub async fn process(&self, url: &str) -> Result<Outcome> {
        if url.is_empty() {
            tracing::debug!("Empty URL submitted");
            return Ok(Outcome::MissingUrl);
        }

        let article = match self.fetcher.extract(url).await {
            Ok(article) => article,
            Err(e) if e.is_fetch() => return Ok(Outcome::FetchFailed(e)),
            Err(e) => return Err(e),
        };

        if article.is_empty() {
            tracing::warn!("No paragraph text found at {}", url);
        }

        let summary = self.summarizer.summarize(article.as_str()).await.map_err(|e| {
            tracing::error!("Summarization failed for {}: {}", url, e);
            e
        })?;

        tracing::info!(url, article_chars = article.char_count(), "Summary generated");

        Ok(Outcome::Summarized { article, summary })
    }
}
