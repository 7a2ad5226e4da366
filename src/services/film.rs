use super::scraping::scrape_page;
use crate::config::SiteUrls;
use crate::domain::{FilmRecord, Storage};
use crate::error::{CrawlError, Result};
use crate::infrastructure::{FilmPageScraper, PageFetcher};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmOutcome {
    /// Inserted, or already present and left untouched.
    Stored,
    /// The detail page had no usable identity.
    Unusable,
    StoreFailed,
}

pub struct FilmService {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn Storage>,
    urls: SiteUrls,
    scraper: FilmPageScraper,
}

impl FilmService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn Storage + 'static>,
        urls: SiteUrls,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            store,
            urls,
            scraper: FilmPageScraper::new()?,
        })
    }

    pub async fn scrape_film(&self, slug: &str) -> Result<FilmRecord> {
        let url = self.urls.film(slug);
        let page = scrape_page(self.fetcher.as_ref(), &url, &self.scraper).await?;
        page.into_record(slug, self.urls.poster_base())
    }

    /// Fetch errors propagate. A page without a film id and a failed insert
    /// are logged and reported through the outcome instead.
    pub async fn scrape_and_store(&self, slug: &str) -> Result<FilmOutcome> {
        let film = match self.scrape_film(slug).await {
            Ok(film) => film,
            Err(CrawlError::Parse(reason)) => {
                warn!("Skipping film '{}': {}", slug, reason);
                return Ok(FilmOutcome::Unusable);
            }
            Err(e) => return Err(e),
        };

        match self.store.insert_film_if_absent(&film) {
            Ok(()) => {
                info!("Stored film {} ({})", film.slug, film.id);
                Ok(FilmOutcome::Stored)
            }
            Err(e) => {
                warn!("Failed to store film {}: {}", film.slug, e);
                Ok(FilmOutcome::StoreFailed)
            }
        }
    }
}
