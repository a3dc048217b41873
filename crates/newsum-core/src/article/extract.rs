//! Paragraph text extraction
//!
//! Article bodies are recovered by collecting every `<p>` element in document
//! order. Each paragraph contributes all of its descendant text nodes, and the
//! paragraphs are joined with no separator. Whitespace inside the text nodes
//! is kept as the page wrote it.

use scraper::{Html, Selector};

/// Extract the concatenated text of all `<p>` elements in `html`
pub fn extract_paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .flat_map(|paragraph| paragraph.text())
        .collect()
}
