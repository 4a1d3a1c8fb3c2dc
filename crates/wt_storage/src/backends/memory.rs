use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use wt_core::{Article, ArticleStore, Error, NewArticle, Result};

#[derive(Default)]
struct Inner {
    next_id: i64,
    articles: Vec<Article>,
}

/// In-memory store, mainly for tests and local runs.
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn create(&self, article: NewArticle) -> Result<Article> {
        let mut inner = self.inner.write().await;
        if inner.articles.iter().any(|a| a.url == article.url) {
            return Err(Error::Conflict(article.url));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let stored = Article {
            id: inner.next_id,
            url: article.url,
            title: article.title,
            content: article.content,
            depth_level: article.depth_level,
            parent_id: article.parent_id,
            summary: None,
            summary_generated: false,
            created_at: now,
            updated_at: now,
        };
        inner.articles.push(stored.clone());
        Ok(stored)
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<Article>> {
        let inner = self.inner.read().await;
        Ok(inner.articles.iter().find(|a| a.url == url).cloned())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>> {
        let inner = self.inner.read().await;
        Ok(inner.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner.articles.iter().any(|a| a.url == url))
    }

    async fn update_summary(&self, id: i64, summary: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let article = inner
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::Storage(format!("No article with id {}", id)))?;
        article.summary = Some(summary.to_string());
        article.summary_generated = true;
        article.updated_at = Utc::now();
        Ok(())
    }

    async fn root_articles_without_summary(&self) -> Result<Vec<Article>> {
        let inner = self.inner.read().await;
        Ok(inner
            .articles
            .iter()
            .filter(|a| a.parent_id.is_none() && !a.summary_generated)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_article(url: &str, depth: u32, parent_id: Option<i64>) -> NewArticle {
        NewArticle {
            url: url.to_string(),
            title: "Test Article".to_string(),
            content: "Test content".to_string(),
            depth_level: depth,
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = MemoryStore::new();
        let created = store
            .create(new_article("https://en.wikipedia.org/wiki/Rust", 0, None))
            .await
            .unwrap();

        assert_eq!(created.depth_level, 0);
        assert!(created.parent_id.is_none());
        assert!(!created.summary_generated);

        let by_url = store
            .get_by_url("https://en.wikipedia.org/wiki/Rust")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_url.id, created.id);

        let by_id = store.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.url, created.url);

        assert!(store
            .exists_by_url("https://en.wikipedia.org/wiki/Rust")
            .await
            .unwrap());
        assert!(!store
            .exists_by_url("https://en.wikipedia.org/wiki/Go")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_url_conflicts() {
        let store = MemoryStore::new();
        let url = "https://en.wikipedia.org/wiki/Rust";
        store.create(new_article(url, 0, None)).await.unwrap();

        let err = store.create(new_article(url, 1, Some(1))).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_summary_sets_flag() {
        let store = MemoryStore::new();
        let created = store
            .create(new_article("https://en.wikipedia.org/wiki/Rust", 0, None))
            .await
            .unwrap();

        store
            .update_summary(created.id, "A systems language.")
            .await
            .unwrap();

        let updated = store.get_by_id(created.id).await.unwrap().unwrap();
        assert!(updated.summary_generated);
        assert_eq!(updated.summary.as_deref(), Some("A systems language."));
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_root_articles_without_summary() {
        let store = MemoryStore::new();
        let root = store
            .create(new_article("https://en.wikipedia.org/wiki/Rust", 0, None))
            .await
            .unwrap();
        store
            .create(new_article(
                "https://en.wikipedia.org/wiki/Memory_safety",
                1,
                Some(root.id),
            ))
            .await
            .unwrap();
        let other_root = store
            .create(new_article("https://en.wikipedia.org/wiki/Compiler", 0, None))
            .await
            .unwrap();

        store.update_summary(other_root.id, "done").await.unwrap();

        let pending = store.root_articles_without_summary().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, root.id);
    }
}
