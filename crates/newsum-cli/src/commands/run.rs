use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use newsum_core::{AppConfig, Pipeline};

use crate::display;

const PROMPT: &str = "URL> ";
const QUIT: &str = ":q";

pub async fn run(config: &AppConfig) -> Result<()> {
    let pipeline = Pipeline::new(config)?;

    println!(
        "newsum: paste a news article URL and press Enter ({} or Ctrl-D to quit)",
        QUIT
    );
    println!(
        "Using {} ({})\n",
        pipeline.summarizer().provider_name(),
        pipeline.summarizer().model()
    );

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    prompt_loop(&pipeline, input, &mut output).await
}

/// Read one URL per line and write the outcome of each request
///
/// A summarization failure ends only the current request.
pub async fn prompt_loop<R, W>(pipeline: &Pipeline, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        // Terminal pastes often carry stray spaces
        let url = line.trim();
        if url == QUIT {
            break;
        }

        if !url.is_empty() {
            output.write_all(b"Fetching and summarizing...\n").await?;
            output.flush().await?;
        }

        let message = match pipeline.process(url).await {
            Ok(outcome) => display::render(&outcome),
            Err(e) => display::render_failure(&e),
        };

        output.write_all(message.as_bytes()).await?;
        output.write_all(b"\n\n").await?;
    }

    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pipeline_with, FakeProvider};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn drive(pipeline: &Pipeline, input: &str) -> String {
        let mut output = Vec::new();
        prompt_loop(pipeline, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_blank_line_warns_without_calls() {
        let provider = FakeProvider::replying("unused");
        let pipeline = pipeline_with(provider.clone());

        let output = drive(&pipeline, "\n   \n").await;

        assert_eq!(output.matches("Warning: Please enter a valid URL.").count(), 2);
        assert!(!output.contains("Fetching"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_is_shown_and_loop_continues() {
        let provider = FakeProvider::replying("unused");
        let pipeline = pipeline_with(provider.clone());

        let output = drive(&pipeline, "not-a-url\n\n").await;

        assert!(output.contains("Error: Failed to fetch news from not-a-url: "));
        assert!(output.contains("Warning: Please enter a valid URL."));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_summary_is_printed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>Hello</p><p>World</p>"))
            .mount(&server)
            .await;

        let provider = FakeProvider::replying("Greeting to the world.");
        let pipeline = pipeline_with(provider.clone());

        let output = drive(&pipeline, &format!("{}\n", server.uri())).await;

        assert!(output.contains("Summary generated successfully!\n\nSummary:\nGreeting to the world."));
        assert_eq!(provider.prompts()[0], newsum_core::ai::render_prompt("HelloWorld"));
    }

    #[tokio::test]
    async fn test_summarization_failure_does_not_end_loop() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>News</p>"))
            .mount(&server)
            .await;

        let provider = FakeProvider::failing("quota exceeded");
        let pipeline = pipeline_with(provider.clone());

        let input = format!("{0}\n{0}\n", server.uri());
        let output = drive(&pipeline, &input).await;

        assert_eq!(output.matches("Error: summarization failed").count(), 2);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_quit_command_stops_reading() {
        let provider = FakeProvider::replying("unused");
        let pipeline = pipeline_with(provider);

        let output = drive(&pipeline, ":q\n\n").await;

        assert!(!output.contains("Warning"));
    }
}
