use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use wt_core::{Error, Result, Summarizer};

const MAX_CONTENT_CHARS: usize = 3000;
const NO_KEY_MESSAGE: &str = "Summary generation unavailable: API key not configured";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Summarizes articles through the OpenAI chat completions API.
///
/// Degrades instead of failing: a missing key yields a fixed explanatory
/// string and a transport or decode failure yields an error-description
/// string, so a crawl is never blocked on the summary step.
pub struct OpenAiSummarizer {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    async fn request_summary(&self, api_key: &str, prompt: String) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are a helpful assistant that creates concise summaries \
                              of Wikipedia articles. Provide clear, informative summaries."
                        .to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            max_tokens: 300,
            temperature: 0.3,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| Error::Inference("Empty completion response".to_string()))
    }
}

impl fmt::Debug for OpenAiSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSummarizer")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn summarize(&self, title: &str, content: &str) -> Result<String> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => return Ok(NO_KEY_MESSAGE.to_string()),
        };

        let prompt = create_prompt(title, content);
        match self.request_summary(&api_key, prompt).await {
            Ok(summary) => Ok(summary),
            Err(e) => Ok(format!("Error generating summary: {}", e)),
        }
    }
}

fn create_prompt(title: &str, content: &str) -> String {
    format!(
        "Create a summary for this Wikipedia article:\n\n\
         Title: {}\n\n\
         Content:\n{}\n\n\
         Requirements:\n\
         - 3 to 5 sentences\n\
         - informative and clear\n\
         - cover the main facts and key information",
        title,
        truncate_chars(content, MAX_CONTENT_CHARS)
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
