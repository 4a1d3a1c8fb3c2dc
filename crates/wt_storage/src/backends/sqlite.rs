use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wt_core::{Article, ArticleStore, Error, NewArticle, Result};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        depth_level INTEGER NOT NULL DEFAULT 0,
        parent_id INTEGER REFERENCES articles(id),
        summary TEXT,
        summary_generated INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

pub struct SqliteStore {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl SqliteStore {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

fn article_from_row(row: &SqliteRow) -> Result<Article> {
    let parse_ts = |column: &str| -> Result<chrono::DateTime<Utc>> {
        chrono::DateTime::parse_from_rfc3339(row.get::<String, _>(column).as_str())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::Storage(format!("Failed to parse {}: {}", column, e)))
    };

    Ok(Article {
        id: row.get("id"),
        url: row.get("url"),
        title: row.get("title"),
        content: row.get("content"),
        depth_level: row.get::<i64, _>("depth_level") as u32,
        parent_id: row.get("parent_id"),
        summary: row.get("summary"),
        summary_generated: row.get("summary_generated"),
        created_at: parse_ts("created_at")?,
        updated_at: parse_ts("updated_at")?,
    })
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn create(&self, article: NewArticle) -> Result<Article> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO articles
            (url, title, content, depth_level, parent_id, summary_generated, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(&article.url)
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.depth_level as i64)
        .bind(article.parent_id)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&*self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict(article.url.clone())
            }
            _ => Error::Storage(format!("Failed to store article: {}", e)),
        })?;

        Ok(Article {
            id: result.last_insert_rowid(),
            url: article.url,
            title: article.title,
            content: article.content,
            depth_level: article.depth_level,
            parent_id: article.parent_id,
            summary: None,
            summary_generated: false,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE url = ?")
            .bind(url)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to get article by url: {}", e)))?;

        row.as_ref().map(article_from_row).transpose()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to get article by id: {}", e)))?;

        row.as_ref().map(article_from_row).transpose()
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM articles WHERE url = ?")
            .bind(url)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to check article existence: {}", e)))?;

        Ok(row.is_some())
    }

    async fn update_summary(&self, id: i64, summary: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE articles SET summary = ?, summary_generated = 1, updated_at = ? WHERE id = ?",
        )
        .bind(summary)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to update summary: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(Error::Storage(format!("No article with id {}", id)));
        }
        Ok(())
    }

    async fn root_articles_without_summary(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            "SELECT * FROM articles WHERE parent_id IS NULL AND summary_generated = 0",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to list pending articles: {}", e)))?;

        rows.iter().map(article_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

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
    async fn test_sqlite_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let store = SqliteStore::new_with_path(&db_path).await.unwrap();

        let root = store
            .create(new_article("https://en.wikipedia.org/wiki/Rust", 0, None))
            .await
            .unwrap();
        let child = store
            .create(new_article(
                "https://en.wikipedia.org/wiki/Memory_safety",
                1,
                Some(root.id),
            ))
            .await
            .unwrap();

        let fetched = store
            .get_by_url("https://en.wikipedia.org/wiki/Memory_safety")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, child.id);
        assert_eq!(fetched.parent_id, Some(root.id));
        assert_eq!(fetched.depth_level, 1);
        assert!(!fetched.summary_generated);
    }

    #[tokio::test]
    async fn test_sqlite_duplicate_url() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let store = SqliteStore::new_with_path(&db_path).await.unwrap();

        let url = "https://en.wikipedia.org/wiki/Rust";
        store.create(new_article(url, 0, None)).await.unwrap();
        let err = store.create(new_article(url, 0, None)).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_sqlite_summary_update() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let store = SqliteStore::new_with_path(&db_path).await.unwrap();

        let root = store
            .create(new_article("https://en.wikipedia.org/wiki/Rust", 0, None))
            .await
            .unwrap();

        let pending = store.root_articles_without_summary().await.unwrap();
        assert_eq!(pending.len(), 1);

        store.update_summary(root.id, "A summary.").await.unwrap();

        let updated = store.get_by_id(root.id).await.unwrap().unwrap();
        assert!(updated.summary_generated);
        assert_eq!(updated.summary.as_deref(), Some("A summary."));
        assert!(store
            .root_articles_without_summary()
            .await
            .unwrap()
            .is_empty());
    }
}
