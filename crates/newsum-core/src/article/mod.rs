mod extract;
mod fetcher;
mod models;

pub use extract::extract_paragraphs;
pub use fetcher::ArticleFetcher;
pub use models::ArticleText;
