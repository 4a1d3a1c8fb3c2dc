use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted Wikipedia article. Roots have `depth_level == 0` and no
/// parent; children carry their parent's id and `parent.depth_level + 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub content: String,
    pub depth_level: u32,
    pub parent_id: Option<i64>,
    pub summary: Option<String>,
    pub summary_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a store. The store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub url: String,
    pub title: String,
    pub content: String,
    pub depth_level: u32,
    pub parent_id: Option<i64>,
}

/// What a fetcher extracts from one page. `links` keeps document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    pub title: String,
    pub content: String,
    pub links: Vec<String>,
}
