use async_trait::async_trait;

use crate::types::{Article, NewArticle};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert a new article, assigning id and timestamps. Fails with
    /// `Error::Conflict` when the URL is already stored.
    async fn create(&self, article: NewArticle) -> Result<Article>;

    /// Get an article by its URL
    async fn get_by_url(&self, url: &str) -> Result<Option<Article>>;

    /// Get an article by its id
    async fn get_by_id(&self, id: i64) -> Result<Option<Article>>;

    /// Check whether an article exists for the URL
    async fn exists_by_url(&self, url: &str) -> Result<bool>;

    /// Write a summary, marking `summary_generated` and bumping `updated_at`
    async fn update_summary(&self, id: i64, summary: &str) -> Result<()>;

    /// Root articles (no parent) whose summary has not been generated yet
    async fn root_articles_without_summary(&self) -> Result<Vec<Article>>;
}
