use std::sync::Arc;

use wt_core::{Error, Result, Summarizer};

pub mod extractive;
pub mod openai;

pub use extractive::ExtractiveSummarizer;
pub use openai::OpenAiSummarizer;

/// Build a summarizer from its CLI/config name.
pub fn create_summarizer(kind: &str, api_key: Option<String>) -> Result<Arc<dyn Summarizer>> {
    match kind {
        "openai" => Ok(Arc::new(OpenAiSummarizer::new(api_key))),
        "extractive" => Ok(Arc::new(ExtractiveSummarizer::new())),
        other => Err(Error::Inference(format!("Unknown summarizer: {}", other))),
    }
}
