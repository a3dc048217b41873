pub mod providers;
mod summarizer;

pub use providers::AiProvider;
pub use summarizer::{render_prompt, Summarizer, Summary, SUMMARY_TEMPERATURE};
