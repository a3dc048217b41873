pub mod ai;
pub mod article;
pub mod config;
pub mod error;
pub mod pipeline;

pub use ai::{Summarizer, Summary};
pub use article::{ArticleFetcher, ArticleText};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use pipeline::{Outcome, Pipeline, MISSING_URL_WARNING};
