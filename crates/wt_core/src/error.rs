use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Fetch failed for {url}: HTTP status {status}")]
    Fetch { url: String, status: u16 },

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Article already exists for URL: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Failures scoped to a single page. The crawler logs these, skips the
    /// node, and keeps going; storage errors propagate instead.
    pub fn is_node_local(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. } | Error::Scraping(_) | Error::Http(_) | Error::InvalidUrl(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
