use filmcrawl::config::Config;
use filmcrawl::error::Result;
use filmcrawl::infrastructure::{HttpFetcher, SqliteStore};
use filmcrawl::services::{CrawlOptions, CrawlService};
use std::sync::Arc;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    let level = config.args.log_level.parse().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let store = Arc::new(SqliteStore::open(&config.args.database)?);
    let fetcher = Arc::new(HttpFetcher::new(config.http_client.clone()));

    let options = CrawlOptions {
        skip_social: config.args.skip_social,
        skip_profile: config.args.skip_profile,
        verify_counts: config.args.verify_counts,
        export: config.args.export.clone(),
    };
    let crawler = CrawlService::new(fetcher, store.clone(), config.urls.clone(), options)?;
    crawler.run(&config.args.username).await?;
    drop(crawler);

    match Arc::try_unwrap(store) {
        Ok(store) => store.close()?,
        Err(_) => warn!("Database handle still shared, leaving it to be dropped"),
    }

    info!("Scraping completed successfully!");
    Ok(())
}
