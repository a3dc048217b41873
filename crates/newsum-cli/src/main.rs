use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsum_core::AppConfig;

mod commands;
mod display;
mod page;
#[cfg(test)]
mod test_support;

#[derive(Parser)]
#[command(name = "newsum")]
#[command(author, version, about = "Paste a news article URL and get an AI summary")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/newsum/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for URLs and summarize each one
    Run,
    /// Summarize a single article
    Summarize {
        /// News article URL
        url: String,
        /// Also print the extracted article text
        #[arg(long)]
        show_article: bool,
    },
    /// Serve the summarizer as a web page
    Serve {
        /// Listen address (overrides [server] addr)
        #[arg(short, long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a local .env file
    check_dotenv(dotenvy::dotenv())?;

    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(&config).await,
        Some(Commands::Summarize { url, show_article }) => {
            commands::summarize::run(&config, &url, show_article).await
        }
        Some(Commands::Serve { addr }) => commands::serve::run(&config, addr).await,
    }
}

/// A missing .env file is fine; a malformed one is not
fn check_dotenv<T>(result: dotenvy::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(anyhow::Error::new(e).context("Failed to load .env file")),
    }
}
