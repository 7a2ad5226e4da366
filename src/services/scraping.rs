use crate::config::SiteUrls;
use crate::domain::{ListingItem, ListingKind};
use crate::error::Result;
use crate::infrastructure::{
    parse_document, ListingScraper, PageFetcher, PageScraper, PaginationScraper,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Fetches `url` and runs `scraper` over it. The parsed document never
/// outlives this call.
pub(crate) async fn scrape_page<S: PageScraper>(
    fetcher: &dyn PageFetcher,
    url: &str,
    scraper: &S,
) -> Result<S::Output> {
    let body = fetcher.fetch(url).await?;
    scraper.extract(&parse_document(&body))
}

/// Walks every page of a user's listing, one page at a time.
pub struct ListingService {
    fetcher: Arc<dyn PageFetcher>,
    urls: SiteUrls,
    pagination: PaginationScraper,
    watched: ListingScraper,
    watchlist: ListingScraper,
}

impl ListingService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, urls: SiteUrls) -> Result<Self> {
        Ok(Self {
            fetcher,
            urls,
            pagination: PaginationScraper::new()?,
            watched: ListingScraper::new(ListingKind::Watched)?,
            watchlist: ListingScraper::new(ListingKind::Watchlist)?,
        })
    }

    fn scraper_for(&self, kind: ListingKind) -> &ListingScraper {
        match kind {
            ListingKind::Watched => &self.watched,
            ListingKind::Watchlist => &self.watchlist,
        }
    }

    pub async fn page_count(&self, username: &str, kind: ListingKind) -> Result<u32> {
        let url = self.urls.category(username, kind.category());
        scrape_page(self.fetcher.as_ref(), &url, &self.pagination).await
    }

    /// Items of every page, concatenated in page order.
    pub async fn scrape_listing(
        &self,
        username: &str,
        kind: ListingKind,
    ) -> Result<Vec<ListingItem>> {
        let category = kind.category();
        let total_pages = self.page_count(username, kind).await?;
        info!("'{}' {}: {} page(s) found", username, category, total_pages);

        let scraper = self.scraper_for(kind);
        let mut items = Vec::new();

        for page in 1..=total_pages {
            let url = self.urls.category_page(username, category, page);
            let page_items = scrape_page(self.fetcher.as_ref(), &url, scraper).await?;
            debug!("{}: {} item(s)", url, page_items.len());
            items.extend(page_items);
        }

        info!("'{}' {}: {} item(s) scraped", username, category, items.len());
        Ok(items)
    }
}
