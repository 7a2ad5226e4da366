use crate::config::cli::Args;
use crate::error::Result;
use clap::Parser;
use reqwest::Client;
use std::time::Duration;

pub mod cli;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Builds every URL the crawler visits.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base_url: String,
    poster_base_url: String,
}

impl SiteUrls {
    pub fn new(base_url: impl Into<String>, poster_base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poster_base_url: poster_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn film(&self, slug: &str) -> String {
        format!("{}/film/{}/", self.base_url, slug)
    }

    pub fn profile(&self, username: &str) -> String {
        format!("{}/{}/", self.base_url, username)
    }

    pub fn category(&self, username: &str, category: &str) -> String {
        format!("{}/{}/{}/", self.base_url, username, category)
    }

    pub fn category_page(&self, username: &str, category: &str, page: u32) -> String {
        format!("{}/{}/{}/page/{}/", self.base_url, username, category, page)
    }

    pub fn following(&self, username: &str) -> String {
        format!("{}following/", self.profile(username))
    }

    pub fn followers(&self, username: &str) -> String {
        format!("{}followers/", self.profile(username))
    }

    pub fn poster_base(&self) -> &str {
        &self.poster_base_url
    }
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self::new(
            "https://letterboxd.com",
            "https://a.ltrbxd.com/resized/film-poster",
        )
    }
}

pub struct Config {
    pub args: Args,
    pub urls: SiteUrls,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if args.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(args.timeout_secs));
        }
        let http_client = builder.build()?;

        let urls = SiteUrls::new(args.base_url.clone(), args.poster_base_url.clone());

        Ok(Self {
            args,
            urls,
            http_client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_listing_and_social_urls() {
        let urls = SiteUrls::new("https://letterboxd.com/", "https://img.example");

        assert_eq!(
            urls.category_page("s0wcy", "films", 3),
            "https://letterboxd.com/s0wcy/films/page/3/"
        );
        assert_eq!(
            urls.category("s0wcy", "watchlist"),
            "https://letterboxd.com/s0wcy/watchlist/"
        );
        assert_eq!(
            urls.following("s0wcy"),
            "https://letterboxd.com/s0wcy/following/"
        );
        assert_eq!(urls.film("dune"), "https://letterboxd.com/film/dune/");
    }

    #[test]
    fn defaults_match_cli_defaults() {
        let args = Args::parse_from(["filmcrawl"]);
        assert_eq!(args.username, "s0wcy");
        assert_eq!(args.timeout_secs, 0);

        let config = Config::from_args(args).unwrap();
        assert_eq!(config.urls.poster_base(), SiteUrls::default().poster_base());
    }
}
