use super::film::{FilmOutcome, FilmService};
use super::scraping::{scrape_page, ListingService};
use crate::config::SiteUrls;
use crate::domain::{ListingItem, ListingKind, Storage, UserProfile};
use crate::error::{CrawlError, Result};
use crate::infrastructure::{FilmCountScraper, PageFetcher, WatchlistCountScraper};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A listing whose counter on the site disagrees with what was scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountMismatch {
    pub listing: &'static str,
    pub shown: u32,
    pub scraped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileReport {
    pub watched: usize,
    pub watchlist: usize,
    pub films_stored: usize,
    pub films_unusable: usize,
    pub films_store_failed: usize,
    pub profile_stored: bool,
    pub count_mismatches: Vec<CountMismatch>,
}

impl ProfileReport {
    fn record(&mut self, outcome: FilmOutcome) {
        match outcome {
            FilmOutcome::Stored => self.films_stored += 1,
            FilmOutcome::Unusable => self.films_unusable += 1,
            FilmOutcome::StoreFailed => self.films_store_failed += 1,
        }
    }
}

pub struct ProfileService {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn Storage>,
    urls: SiteUrls,
    listings: ListingService,
    films: FilmService,
    verify_counts: bool,
}

impl ProfileService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn Storage + 'static>,
        urls: SiteUrls,
    ) -> Result<Self> {
        Ok(Self {
            listings: ListingService::new(fetcher.clone(), urls.clone())?,
            films: FilmService::new(fetcher.clone(), store.clone(), urls.clone())?,
            fetcher,
            store,
            urls,
            verify_counts: false,
        })
    }

    /// Also read the counters the site shows and warn when the crawl
    /// found a different number of films.
    pub fn with_count_verification(mut self, enabled: bool) -> Self {
        self.verify_counts = enabled;
        self
    }

    /// Watched and watchlist listings, every referenced film, then the
    /// profile row. Films in both listings are scraped twice; the store
    /// ignores the second insert.
    pub async fn scrape_profile(&self, username: &str) -> Result<ProfileReport> {
        info!("Scraping profile of '{}'", username);

        let watched = self
            .listings
            .scrape_listing(username, ListingKind::Watched)
            .await?;
        let watchlist = self
            .listings
            .scrape_listing(username, ListingKind::Watchlist)
            .await?;

        let count_mismatches = if self.verify_counts {
            self.check_counts(username, watched.len(), watchlist.len())
                .await?
        } else {
            Vec::new()
        };

        let mut report = ProfileReport {
            watched: watched.len(),
            watchlist: watchlist.len(),
            count_mismatches,
            ..Default::default()
        };
        let mut profile = UserProfile::new(username);

        let pb = progress_bar((watched.len() + watchlist.len()) as u64)?;

        for item in &watched {
            profile.push_watched(item);
            report.record(self.store_film(item, &pb).await?);
        }
        for item in &watchlist {
            profile.push_watchlist(item);
            report.record(self.store_film(item, &pb).await?);
        }
        pb.finish_and_clear();

        match self.store.upsert_user_profile(&profile) {
            Ok(()) => {
                info!("Stored profile of '{}'", username);
                report.profile_stored = true;
            }
            Err(e) => warn!("Failed to store profile of '{}': {}", username, e),
        }

        Ok(report)
    }

    async fn store_film(&self, item: &ListingItem, pb: &ProgressBar) -> Result<FilmOutcome> {
        pb.set_message(item.slug.clone());
        let outcome = self.films.scrape_and_store(&item.slug).await?;
        pb.inc(1);
        Ok(outcome)
    }

    async fn check_counts(
        &self,
        username: &str,
        watched: usize,
        watchlist: usize,
    ) -> Result<Vec<CountMismatch>> {
        let films_shown = scrape_page(
            self.fetcher.as_ref(),
            &self.urls.profile(username),
            &FilmCountScraper::new()?,
        )
        .await?;
        let watchlist_shown = scrape_page(
            self.fetcher.as_ref(),
            &self.urls.category(username, ListingKind::Watchlist.category()),
            &WatchlistCountScraper::new()?,
        )
        .await?;

        let mut mismatches = Vec::new();
        for (listing, shown, scraped) in [
            ("films", films_shown, watched),
            ("watchlist", watchlist_shown, watchlist),
        ] {
            match shown {
                Some(shown) if shown as usize != scraped => {
                    warn!(
                        "'{}' {}: site shows {} but {} were scraped",
                        username, listing, shown, scraped
                    );
                    mismatches.push(CountMismatch {
                        listing,
                        shown,
                        scraped,
                    });
                }
                Some(_) => {}
                None => debug!("'{}' {}: no readable counter on the page", username, listing),
            }
        }

        Ok(mismatches)
    }
}

fn progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .map_err(|e| CrawlError::Other(e.to_string()))?,
    );
    Ok(pb)
}
