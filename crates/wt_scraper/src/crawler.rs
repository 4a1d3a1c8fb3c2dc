use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{error, info};
use wt_core::{Article, ArticleFetcher, ArticleStore, Error, FetchedPage, NewArticle, Result, Summarizer};

use crate::wikipedia;

/// How many links are expanded per article, in extraction order.
pub const MAX_CHILD_LINKS: usize = 5;

/// Drives the recursive fetch-dedupe-persist walk over article links.
///
/// One crawl is expected to be in flight for a given root at a time;
/// overlapping crawls of intersecting trees may race on the store's
/// URL uniqueness constraint and are not coordinated here.
pub struct Crawler {
    store: Arc<dyn ArticleStore>,
    summarizer: Arc<dyn Summarizer>,
    max_depth: u32,
}

impl Crawler {
    pub fn new(store: Arc<dyn ArticleStore>, summarizer: Arc<dyn Summarizer>, max_depth: u32) -> Self {
        Self {
            store,
            summarizer,
            max_depth,
        }
    }

    /// Crawl a root article and its linked articles, then generate the root
    /// summary. An already-stored root is returned as-is: no re-crawl, no
    /// summary regeneration. The fetcher is passed in explicitly so its
    /// HTTP session spans exactly one root crawl.
    pub async fn parse_and_save(
        &self,
        fetcher: &dyn ArticleFetcher,
        url: &str,
    ) -> Result<Option<Article>> {
        if !wikipedia::is_wikipedia_url(url) {
            return Err(Error::InvalidUrl(format!(
                "URL must be a Wikipedia article URL: {}",
                url
            )));
        }

        if let Some(existing) = self.store.get_by_url(url).await? {
            return Ok(Some(existing));
        }

        let root = self
            .parse_recursive(fetcher, url.to_string(), 0, None)
            .await?;

        if let Some(root) = &root {
            self.generate_root_summary(root).await;
        }

        Ok(root)
    }

    /// Depth-first walk. Fetch failures are contained to the node (logged,
    /// `None`); store failures propagate. Articles at `depth == max_depth`
    /// are still fetched and stored, but their links are not expanded.
    fn parse_recursive<'a>(
        &'a self,
        fetcher: &'a dyn ArticleFetcher,
        url: String,
        depth: u32,
        parent_id: Option<i64>,
    ) -> BoxFuture<'a, Result<Option<Article>>> {
        Box::pin(async move {
            if depth > self.max_depth {
                return Ok(None);
            }

            if let Some(existing) = self.store.get_by_url(&url).await? {
                return Ok(Some(existing));
            }

            info!("Parsing article at depth {}: {}", depth, url);
            let FetchedPage {
                title,
                content,
                links,
            } = match fetcher.fetch(&url).await {
                Ok(page) => page,
                Err(e) if e.is_node_local() => {
                    error!("Error parsing article {}: {}", url, e);
                    return Ok(None);
                }
                Err(e) => return Err(e),
            };

            let article = self
                .store
                .create(NewArticle {
                    url,
                    title,
                    content,
                    depth_level: depth,
                    parent_id,
                })
                .await?;

            if depth < self.max_depth {
                self.parse_child_articles(fetcher, &links, depth + 1, article.id)
                    .await?;
            }

            Ok(Some(article))
        })
    }

    async fn parse_child_articles(
        &self,
        fetcher: &dyn ArticleFetcher,
        links: &[String],
        depth: u32,
        parent_id: i64,
    ) -> Result<()> {
        for link in links.iter().take(MAX_CHILD_LINKS) {
            // The recursive call re-checks the store; this pre-check just
            // avoids a wasted fetch for links that already have an owner.
            if self.store.exists_by_url(link).await? {
                continue;
            }

            if let Err(e) = self
                .parse_recursive(fetcher, link.clone(), depth, Some(parent_id))
                .await
            {
                error!("Error parsing child article {}: {}", link, e);
            }
        }
        Ok(())
    }

    /// Summarize a freshly crawled root. A summarizer failure is logged and
    /// nothing is written, so the article stays eligible for a later retry.
    pub async fn generate_root_summary(&self, article: &Article) {
        if article.depth_level != 0 || article.summary_generated {
            return;
        }

        info!("Generating summary for article: {}", article.title);
        match self
            .summarizer
            .summarize(&article.title, &article.content)
            .await
        {
            Ok(summary) => {
                if let Err(e) = self.store.update_summary(article.id, &summary).await {
                    error!("Error saving summary for {}: {}", article.title, e);
                } else {
                    info!("Summary generated for article: {}", article.title);
                }
            }
            Err(e) => {
                error!("Error generating summary for {}: {}", article.title, e);
            }
        }
    }

    /// Sweep all root articles without a summary. Whatever text the
    /// summarizer returns is persisted, error strings included; only a
    /// raised error skips an article, and the sweep continues to the next.
    pub async fn generate_pending_summaries(&self) -> Result<usize> {
        let articles = self.store.root_articles_without_summary().await?;
        let mut count = 0;

        for article in articles {
            match self
                .summarizer
                .summarize(&article.title, &article.content)
                .await
            {
                Ok(summary) => match self.store.update_summary(article.id, &summary).await {
                    Ok(()) => {
                        count += 1;
                        info!("Summary generated for article: {}", article.title);
                    }
                    Err(e) => {
                        error!("Error saving summary for {}: {}", article.title, e);
                    }
                },
                Err(e) => {
                    error!("Error generating summary for {}: {}", article.title, e);
                }
            }
        }

        Ok(count)
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
