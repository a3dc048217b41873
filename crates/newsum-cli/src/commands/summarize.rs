use anyhow::{bail, Result};

use newsum_core::{AppConfig, Outcome, Pipeline, MISSING_URL_WARNING};

pub async fn run(config: &AppConfig, url: &str, show_article: bool) -> Result<()> {
    let pipeline = Pipeline::new(config)?;

    match pipeline.process(url).await? {
        Outcome::MissingUrl => bail!(MISSING_URL_WARNING),
        Outcome::FetchFailed(e) => Err(e.into()),
        Outcome::Summarized { article, summary } => {
            if show_article {
                println!("Article ({} chars):\n{}\n", article.char_count(), article);
            }
            println!("{}", summary);
            Ok(())
        }
    }
}
