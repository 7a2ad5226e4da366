use crate::config::SiteUrls;
use crate::domain::{Snapshot, Storage};
use crate::error::{CrawlError, Result};
use crate::infrastructure::PageFetcher;
use crate::services::{
    profile::{ProfileReport, ProfileService},
    social::SocialService,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    pub skip_social: bool,
    pub skip_profile: bool,
    pub verify_counts: bool,
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub following: usize,
    pub followers: usize,
    pub profile: Option<ProfileReport>,
}

pub struct CrawlService {
    store: Arc<dyn Storage>,
    social: SocialService,
    profile: ProfileService,
    options: CrawlOptions,
}

impl CrawlService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn Storage + 'static>,
        urls: SiteUrls,
        options: CrawlOptions,
    ) -> Result<Self> {
        Ok(Self {
            social: SocialService::new(fetcher.clone(), store.clone(), urls.clone())?,
            profile: ProfileService::new(fetcher, store.clone(), urls)?
                .with_count_verification(options.verify_counts),
            store,
            options,
        })
    }

    /// Social graph first, then the profile. Any fetch error ends the run.
    pub async fn run(&self, username: &str) -> Result<CrawlSummary> {
        info!("Starting crawl of '{}'", username);
        let mut summary = CrawlSummary::default();

        if !self.options.skip_social {
            let social = self.social.scrape_user(username).await?;
            summary.following = social.following.len();
            summary.followers = social.followers.len();
        }

        if !self.options.skip_profile {
            let report = self.profile.scrape_profile(username).await?;
            info!(
                "Profile crawl completed: {} watched, {} in watchlist, {} film page(s) stored, {} unusable, {} failed to store",
                report.watched,
                report.watchlist,
                report.films_stored,
                report.films_unusable,
                report.films_store_failed
            );
            summary.profile = Some(report);
        }

        if let Some(path) = &self.options.export {
            self.export_snapshot(username, path)?;
        }

        info!("Crawl of '{}' completed", username);
        Ok(summary)
    }

    pub fn snapshot(&self, username: &str) -> Result<Snapshot> {
        let user = self
            .store
            .get_user(username)?
            .ok_or_else(|| CrawlError::Other(format!("user '{}' is not stored", username)))?;

        let mut ids = user.watched.clone();
        ids.extend(user.watchlist.iter().cloned());
        let films = self.store.get_films(&ids)?;

        Ok(Snapshot::new(user, films))
    }

    fn export_snapshot(&self, username: &str, path: &Path) -> Result<()> {
        let snapshot = self.snapshot(username)?;
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        info!(
            "Exported {} film(s) for '{}' to {}",
            snapshot.total_films,
            username,
            path.display()
        );
        Ok(())
    }
}
