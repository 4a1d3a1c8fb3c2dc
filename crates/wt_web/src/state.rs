use std::sync::Arc;
use wt_core::{ArticleFetcher, ArticleStore};
use wt_scraper::Crawler;

pub struct AppState {
    pub crawler: Arc<Crawler>,
    pub store: Arc<dyn ArticleStore>,
    pub fetcher: Arc<dyn ArticleFetcher>,
}
