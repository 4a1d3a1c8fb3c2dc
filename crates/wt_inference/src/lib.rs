pub mod models;

pub use models::{create_summarizer, ExtractiveSummarizer, OpenAiSummarizer};

pub mod prelude {
    pub use super::models::create_summarizer;
    pub use wt_core::{Result, Summarizer};
}
