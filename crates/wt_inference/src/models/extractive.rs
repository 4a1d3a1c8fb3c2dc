use async_trait::async_trait;
use wt_core::{Result, Summarizer};

/// Offline fallback: takes the first few sentences of the article body.
#[derive(Debug, Default)]
pub struct ExtractiveSummarizer;

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    fn name(&self) -> &str {
        "Extractive"
    }

    async fn summarize(&self, _title: &str, content: &str) -> Result<String> {
        let sentences: Vec<&str> = content
            .split(|c| c == '.' || c == '!' || c == '?')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .take(3)
            .collect();

        if sentences.is_empty() {
            return Ok(String::new());
        }
        Ok(sentences.join(". ") + ".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_takes_first_three_sentences() {
        let summarizer = ExtractiveSummarizer::new();
        let content = "One. Two! Three? Four. Five.";
        let summary = summarizer.summarize("Title", content).await.unwrap();
        assert_eq!(summary, "One. Two. Three.");
    }

    #[tokio::test]
    async fn test_empty_content() {
        let summarizer = ExtractiveSummarizer::new();
        let summary = summarizer.summarize("Title", "").await.unwrap();
        assert_eq!(summary, "");
    }
}
