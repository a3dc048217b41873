use std::fmt;

/// Paragraph text extracted from one article page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleText(String);

impl ArticleText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, not bytes
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for ArticleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
