mod clients;
mod scrapers;
mod storage;

pub use clients::fetcher::{parse_document, HttpFetcher, PageFetcher};
pub use scrapers::{
    film::{FilmPage, FilmPageScraper},
    listing::{ListingScraper, PaginationScraper},
    people::PeopleScraper,
    profile_stats::{FilmCountScraper, WatchlistCountScraper},
    PageScraper,
};
pub use storage::sqlite_store::SqliteStore;
