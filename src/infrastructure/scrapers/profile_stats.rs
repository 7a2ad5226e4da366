use super::{first_attr, first_text, parse_count, selector, PageScraper};
use crate::error::Result;
use scraper::{Html, Selector};

/// "Films" counter in the stats block of a profile root page.
pub struct FilmCountScraper {
    films: Selector,
}

impl FilmCountScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            films: selector(".profile-stats h4:first-child a .value")?,
        })
    }
}

impl PageScraper for FilmCountScraper {
    type Output = Option<u32>;

    fn extract(&self, document: &Html) -> Result<Option<u32>> {
        Ok(parse_count(&first_text(document, &self.films)))
    }
}

/// Entry count the watchlist page announces on its content block.
pub struct WatchlistCountScraper {
    content: Selector,
}

impl WatchlistCountScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            content: selector(".js-watchlist-content")?,
        })
    }
}

impl PageScraper for WatchlistCountScraper {
    type Output = Option<u32>;

    fn extract(&self, document: &Html) -> Result<Option<u32>> {
        Ok(parse_count(&first_attr(
            document,
            &self.content,
            "data-num-entries",
        )))
    }
}
