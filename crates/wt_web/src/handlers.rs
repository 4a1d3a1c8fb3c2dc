use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use wt_core::{Article, Error};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub content: String,
    pub depth_level: u32,
    pub summary: Option<String>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            url: article.url,
            title: article.title,
            content: article.content,
            depth_level: article.depth_level,
            summary: article.summary,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub url: String,
    pub title: String,
    pub summary: Option<String>,
    pub summary_generated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    fn not_found(detail: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err {
            Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Crawl a root article (and its linked articles) and return it.
pub async fn parse_article(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = state
        .crawler
        .parse_and_save(state.fetcher.as_ref(), &request.url)
        .await?;

    match article {
        Some(article) => Ok(Json(article.into())),
        None => Err(ApiError::not_found("Failed to parse article")),
    }
}

/// Look up a stored article's summary by URL.
pub async fn get_article_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let article = state.store.get_by_url(&query.url).await?;

    match article {
        Some(article) => Ok(Json(SummaryResponse {
            url: article.url,
            title: article.title,
            summary: article.summary,
            summary_generated: article.summary_generated,
        })),
        None => Err(ApiError::not_found("Article not found")),
    }
}

/// Kick off the pending-summary sweep in the background.
pub async fn generate_pending_summaries(
    State(state): State<Arc<AppState>>,
) -> Json<MessageResponse> {
    let crawler = state.crawler.clone();
    tokio::spawn(async move {
        if let Err(e) = crawler.generate_pending_summaries().await {
            error!("Pending summary sweep failed: {}", e);
        }
    });

    Json(MessageResponse {
        message: "Summary generation started in the background".to_string(),
    })
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wt_core::{ArticleFetcher, ArticleStore, FetchedPage, Result, Summarizer};
    use wt_inference::ExtractiveSummarizer;
    use wt_scraper::Crawler;
    use wt_storage::MemoryStore;

    struct StubFetcher;

    #[async_trait]
    impl ArticleFetcher for StubFetcher {
        async fn fetch(&self, _url: &str) -> Result<FetchedPage> {
            Ok(FetchedPage {
                title: "Rust".to_string(),
                content: "A language. Empowering everyone. Fast and safe.".to_string(),
                links: vec![],
            })
        }
    }

    fn test_state() -> Arc<AppState> {
        let store: Arc<dyn ArticleStore> = Arc::new(MemoryStore::new());
        let summarizer: Arc<dyn Summarizer> = Arc::new(ExtractiveSummarizer::new());
        Arc::new(AppState {
            crawler: Arc::new(Crawler::new(store.clone(), summarizer, 5)),
            store,
            fetcher: Arc::new(StubFetcher),
        })
    }

    #[tokio::test]
    async fn test_parse_article_rejects_invalid_url() {
        let state = test_state();
        let err = parse_article(
            State(state),
            Json(ParseRequest {
                url: "https://other.tld/x".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_then_summary_lookup() {
        let state = test_state();
        let url = "https://en.wikipedia.org/wiki/Rust";

        let parsed = parse_article(
            State(state.clone()),
            Json(ParseRequest {
                url: url.to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(parsed.0.title, "Rust");
        assert_eq!(parsed.0.depth_level, 0);

        let summary = get_article_summary(
            State(state),
            Query(SummaryQuery {
                url: url.to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(summary.0.summary_generated);
        assert_eq!(
            summary.0.summary.as_deref(),
            Some("A language. Empowering everyone. Fast and safe.")
        );
    }

    #[tokio::test]
    async fn test_summary_unknown_url_is_404() {
        let state = test_state();
        let err = get_article_summary(
            State(state),
            Query(SummaryQuery {
                url: "https://en.wikipedia.org/wiki/Unknown".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
