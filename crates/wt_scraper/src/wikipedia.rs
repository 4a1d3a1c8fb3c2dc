use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use wt_core::{ArticleFetcher, Error, FetchedPage, Result};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const MAX_PARAGRAPHS: usize = 10;
const MIN_PARAGRAPH_CHARS: usize = 50;
const MAX_LINKS: usize = 10;

// The bare ':' and '#' markers already exclude every namespace and fragment
// link; the named prefixes are kept from the original filter list.
const INVALID_LINK_MARKERS: &[&str] = &[
    ":",
    "#",
    "File:",
    "Category:",
    "Template:",
    "Help:",
    "Special:",
    "Talk:",
    "User:",
    "Wikipedia:",
    "Portal:",
    "MediaWiki:",
];

/// True when the URL points at a Wikipedia article page.
pub fn is_wikipedia_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            parsed
                .host_str()
                .map_or(false, |host| host.contains("wikipedia.org"))
                && parsed.path().contains("/wiki/")
        }
        Err(_) => false,
    }
}

/// True when an in-page href is a plain article link, excluding namespace
/// pages (files, categories, talk pages and the like).
pub fn is_valid_article_link(href: &str) -> bool {
    if !href.starts_with("/wiki/") {
        return false;
    }
    let rest = &href["/wiki/".len()..];
    !INVALID_LINK_MARKERS.iter().any(|marker| rest.contains(marker))
}

/// Fetches Wikipedia pages and extracts title, body text and article links.
/// Owns the HTTP client; build one per crawl so the connection pool is
/// scoped to that crawl.
pub struct WikipediaParser {
    client: reqwest::Client,
}

impl WikipediaParser {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleFetcher for WikipediaParser {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let base = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        Ok(parse_page(&html, &base))
    }
}

fn parse_page(html: &str, base: &Url) -> FetchedPage {
    let document = Html::parse_document(html);
    FetchedPage {
        title: extract_title(&document),
        content: extract_content(&document),
        links: extract_links(&document, base),
    }
}

fn extract_title(document: &Html) -> String {
    let selector = Selector::parse("h1.firstHeading").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| "Unknown Title".to_string())
}

fn extract_content(document: &Html) -> String {
    let selector = Selector::parse("div#mw-content-text p").unwrap();
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .take(MAX_PARAGRAPHS)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let selector = Selector::parse("div#mw-content-text a[href]").unwrap();
    let mut links = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        if !is_valid_article_link(href) {
            continue;
        }
        let full_url = match base.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => continue,
        };
        if seen.insert(full_url.clone()) {
            links.push(full_url);
            if links.len() >= MAX_LINKS {
                break;
            }
        }
    }

    links
}
