//! Single-page HTML view for `newsum serve`

use newsum_core::{Error, Outcome, MISSING_URL_WARNING};

use crate::display::SUCCESS_BANNER;

/// Status message rendered under the form
#[derive(Debug, PartialEq, Eq)]
pub enum Banner {
    Warning(String),
    Error(String),
    Success { summary: String },
}

impl Banner {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::MissingUrl => Banner::Warning(MISSING_URL_WARNING.to_string()),
            Outcome::FetchFailed(e) => Banner::Error(e.to_string()),
            Outcome::Summarized { summary, .. } => Banner::Success {
                summary: summary.to_string(),
            },
        }
    }

    pub fn from_failure(error: &Error) -> Self {
        Banner::Error(format!("Summarization failed: {}", error))
    }
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; min-height: 100vh; margin: 0;
       background: linear-gradient(135deg, #0f2027, #203a43, #2c5364); color: #00ffe7; }
main { max-width: 720px; margin: 3rem auto; padding: 2rem; border-radius: 20px;
       background: rgba(255, 255, 255, 0.05); box-shadow: 0 0 40px rgba(0, 255, 255, 0.3); }
input[type=url], input[type=text] { width: 100%; box-sizing: border-box; padding: 0.5rem;
       background: #111; color: #00ffe7; border: 1px solid #00ffe7; }
button { margin-top: 1rem; padding: 0.5rem 1.2rem; border: none; border-radius: 8px;
       background: #ff6f61; color: white; font-weight: bold; cursor: pointer; }
button:hover { background: #e14a3f; }
.banner { margin-top: 1.5rem; padding: 0.75rem 1rem; border-radius: 8px; }
.warning { background: rgba(255, 193, 7, 0.2); color: #ffd54f; }
.error { background: rgba(244, 67, 54, 0.2); color: #ff8a80; }
.success { background: rgba(76, 175, 80, 0.2); color: #b9f6ca; }
.summary { white-space: pre-wrap; color: #e0f7fa; }
"#;

/// Render the page, keeping `url` in the input box
pub fn render_page(url: &str, banner: Option<&Banner>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>AI News Summarizer</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<main>\n");
    html.push_str("<h1>AI News Summarizer</h1>\n");
    html.push_str("<p>Paste a news article URL and get an instant summary.</p>\n");
    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str("<label for=\"url\">Enter News URL:</label>\n");
    html.push_str(&format!(
        "<input id=\"url\" name=\"url\" type=\"text\" value=\"{}\" autofocus>\n",
        escape_html(url)
    ));
    html.push_str("<button type=\"submit\">Summarize</button>\n</form>\n");

    match banner {
        Some(Banner::Warning(message)) => {
            html.push_str(&format!(
                "<div class=\"banner warning\">{}</div>\n",
                escape_html(message)
            ));
        }
        Some(Banner::Error(message)) => {
            html.push_str(&format!(
                "<div class=\"banner error\">{}</div>\n",
                escape_html(message)
            ));
        }
        Some(Banner::Success { summary }) => {
            html.push_str(&format!(
                "<div class=\"banner success\">{}</div>\n<h3>Summary:</h3>\n<div class=\"summary\">{}</div>\n",
                SUCCESS_BANNER,
                escape_html(summary)
            ));
        }
        None => {}
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
