pub mod config;
pub mod error;
pub mod fetcher;
pub mod inference;
pub mod storage;
pub mod types;

pub use config::Settings;
pub use error::Error;
pub use fetcher::ArticleFetcher;
pub use inference::Summarizer;
pub use storage::ArticleStore;
pub use types::{Article, FetchedPage, NewArticle};

pub type Result<T> = std::result::Result<T, Error>;
