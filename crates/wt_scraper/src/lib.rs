pub mod crawler;
pub mod wikipedia;

pub use crawler::Crawler;
pub use wikipedia::{is_valid_article_link, is_wikipedia_url, WikipediaParser};

pub mod prelude {
    pub use super::{Crawler, WikipediaParser};
    pub use wt_core::{Article, Error, Result};
}
