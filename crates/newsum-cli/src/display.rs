//! Terminal rendering of request outcomes

use newsum_core::{Error, Outcome, MISSING_URL_WARNING};

pub const SUCCESS_BANNER: &str = "Summary generated successfully!";

/// Text for one finished request
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::MissingUrl => format!("Warning: {}", MISSING_URL_WARNING),
        Outcome::FetchFailed(e) => format!("Error: {}", e),
        Outcome::Summarized { summary, .. } => {
            format!("{}\n\nSummary:\n{}", SUCCESS_BANNER, summary)
        }
    }
}

/// Text for a request that ended with a summarization error
pub fn render_failure(error: &Error) -> String {
    format!("Error: summarization failed: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_warning() {
        assert_eq!(render(&Outcome::MissingUrl), "Warning: Please enter a valid URL.");
    }

    #[test]
    fn test_fetch_failure_shows_error_message() {
        let outcome = Outcome::FetchFailed(Error::fetch("http://bad.example", "dns error"));
        assert_eq!(
            render(&outcome),
            "Error: Failed to fetch news from http://bad.example: dns error"
        );
    }

    #[test]
    fn test_summarization_failure() {
        let error = Error::AiProvider("quota exceeded".to_string());
        assert_eq!(
            render_failure(&error),
            "Error: summarization failed: AI provider error: quota exceeded"
        );
    }
}
