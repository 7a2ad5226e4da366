use super::scraping::scrape_page;
use crate::config::SiteUrls;
use crate::domain::{Storage, UserSocial};
use crate::error::Result;
use crate::infrastructure::{PageFetcher, PeopleScraper};
use std::sync::Arc;
use tracing::{info, warn};

/// Following and followers, first page of each.
pub struct SocialService {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn Storage>,
    urls: SiteUrls,
    people: PeopleScraper,
}

impl SocialService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn Storage + 'static>,
        urls: SiteUrls,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            store,
            urls,
            people: PeopleScraper::new()?,
        })
    }

    pub async fn scrape_user(&self, username: &str) -> Result<UserSocial> {
        info!("Scraping social graph of '{}'", username);

        let following = scrape_page(
            self.fetcher.as_ref(),
            &self.urls.following(username),
            &self.people,
        )
        .await?;
        let followers = scrape_page(
            self.fetcher.as_ref(),
            &self.urls.followers(username),
            &self.people,
        )
        .await?;

        let social = UserSocial {
            id: username.to_string(),
            following,
            followers,
        };
        info!(
            "'{}' follows {} and is followed by {}",
            username,
            social.following.len(),
            social.followers.len()
        );

        if let Err(e) = self.store.upsert_user_social(&social) {
            warn!("Failed to store social graph of '{}': {}", username, e);
        }

        Ok(social)
    }
}
