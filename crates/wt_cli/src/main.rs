use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use wt_core::{Result, Settings};
use wt_scraper::{Crawler, WikipediaParser};

#[derive(Parser, Debug)]
#[command(author, version, about = "Wikipedia article crawler and summarizer", long_about = None)]
struct Cli {
    /// Storage backend: memory or sqlite
    #[arg(long, default_value = "memory")]
    storage: String,
    /// Database file path for the sqlite backend (or WIKITREE_DB_PATH)
    #[arg(long)]
    db_path: Option<String>,
    /// Summarizer backend: openai (uses OPENAI_API_KEY) or extractive
    #[arg(long, default_value = "openai")]
    summarizer: String,
    /// Maximum crawl depth (overrides MAX_RECURSION_DEPTH)
    #[arg(long)]
    max_depth: Option<u32>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a Wikipedia article and its linked articles
    Crawl { url: String },
    /// Print the stored summary for an article URL
    Summary { url: String },
    /// Generate summaries for root articles that have none
    GenerateSummaries,
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let settings = Settings::from_env();

    let db_path = cli.db_path.or(settings.db_path);
    let store = wt_storage::create_store(&cli.storage, db_path.as_deref()).await?;
    info!("Storage initialized (using {})", cli.storage);

    let summarizer = wt_inference::create_summarizer(&cli.summarizer, settings.openai_api_key)?;
    info!("Summarizer initialized (using {})", summarizer.name());

    let max_depth = cli.max_depth.unwrap_or(settings.max_recursion_depth);
    let crawler = Crawler::new(store.clone(), summarizer, max_depth);

    match cli.command {
        Commands::Crawl { url } => {
            let parser = WikipediaParser::new()?;
            match crawler.parse_and_save(&parser, &url).await? {
                Some(article) => {
                    println!("Crawled \"{}\" ({})", article.title, article.url);
                }
                None => {
                    println!("No article produced for {}", url);
                }
            }
        }
        Commands::Summary { url } => match store.get_by_url(&url).await? {
            Some(article) => match article.summary {
                Some(summary) => println!("{}\n\n{}", article.title, summary),
                None => println!("{}: no summary generated yet", article.title),
            },
            None => println!("Article not found: {}", url),
        },
        Commands::GenerateSummaries => {
            let count = crawler.generate_pending_summaries().await?;
            println!("Generated {} summaries", count);
        }
        Commands::Serve { port } => {
            let state = wt_web::AppState {
                crawler: Arc::new(crawler),
                store,
                fetcher: Arc::new(WikipediaParser::new()?),
            };
            let app = wt_web::create_app(state);
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            info!("Listening on port {}", port);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
