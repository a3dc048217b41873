use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The article page could not be retrieved.
    #[error("Failed to fetch news from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),
}

impl Error {
    pub fn fetch(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for failures that happened while retrieving the article
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
