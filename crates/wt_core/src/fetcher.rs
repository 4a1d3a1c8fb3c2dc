use async_trait::async_trait;

use crate::types::FetchedPage;
use crate::Result;

#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Retrieve one page and extract title, body text and outbound
    /// article links. Network and parse failures are per-page errors.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}
