pub mod crawl_service;
pub mod film;
pub mod profile;
pub mod scraping;
pub mod social;

pub use crawl_service::{CrawlOptions, CrawlService, CrawlSummary};
pub use film::{FilmOutcome, FilmService};
pub use profile::{CountMismatch, ProfileReport, ProfileService};
pub use scraping::ListingService;
pub use social::SocialService;
