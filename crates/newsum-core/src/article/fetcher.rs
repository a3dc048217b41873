use std::error::Error as StdError;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Proxy};
use url::Url;

use super::extract::extract_paragraphs;
use super::models::ArticleText;
use crate::config::AppConfig;
use crate::{Error, Result};

/// Article fetcher: one GET per call, no retries
pub struct ArticleFetcher {
    client: Client,
    user_agent: String,
}

impl ArticleFetcher {
    /// Create a new article fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.fetch.timeout_secs, &config.fetch.proxy_url)?;

        Ok(Self {
            client,
            user_agent: config.fetch.user_agent.clone(),
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .gzip(true)
            .deflate(true)
            .brotli(true);

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for article fetching");
        }

        builder.build().map_err(Error::Http)
    }

    /// Build browser-like headers for a request
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        if let Ok(ua) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers
    }

    /// Fetch `url` and return the text of its paragraphs
    ///
    /// Any failure to retrieve the page becomes [`Error::Fetch`]. The status
    /// code is not checked, so an error page yields whatever paragraphs it has.
    pub async fn extract(&self, url: &str) -> Result<ArticleText> {
        tracing::info!("Fetching article from: {}", url);

        let html = self.fetch_html(url).await.map_err(|e| {
            tracing::warn!("Fetch failed for {}: {}", url, e);
            e
        })?;

        let text = extract_paragraphs(&html);
        tracing::debug!(url, bytes = html.len(), chars = text.chars().count(), "Extracted article text");

        Ok(ArticleText::new(text))
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| Error::fetch(url, e))?;

        let response = self
            .client
            .get(parsed)
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| Error::fetch(url, error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Received {} for {}, extracting paragraphs anyway", status, url);
        }

        response
            .text()
            .await
            .map_err(|e| Error::fetch(url, error_chain(&e)))
    }
}

/// Render an error with its sources, e.g. "error sending request: operation timed out"
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
