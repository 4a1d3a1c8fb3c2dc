use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Produce a short natural-language summary for an article.
    async fn summarize(&self, title: &str, content: &str) -> Result<String>;
}
