use super::{element_text, selector, PageScraper};
use crate::domain::{LikeStatus, ListingItem, ListingKind};
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

static RATED_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^rated-(\d+)$").unwrap());

/// Turns one listing page into items.
///
/// Every value of an item is read from inside its own `.poster-container`,
/// so a poster without viewing data cannot shift the ratings or likes of the
/// posters after it.
pub struct ListingScraper {
    kind: ListingKind,
    container: Selector,
    poster: Selector,
    rating: Selector,
    liked: Selector,
}

impl ListingScraper {
    pub fn new(kind: ListingKind) -> Result<Self> {
        Ok(Self {
            kind,
            container: selector(".poster-container")?,
            poster: selector(".poster")?,
            rating: selector(".poster-viewingdata .rating")?,
            liked: selector(".icon-liked")?,
        })
    }

    fn extract_item(&self, container: ElementRef<'_>) -> Option<ListingItem> {
        let poster = container.select(&self.poster).next()?;
        let film_id = poster.value().attr("data-film-id").unwrap_or_default();
        let slug = poster.value().attr("data-film-slug").unwrap_or_default();
        if film_id.is_empty() || slug.is_empty() {
            return None;
        }

        let mut item = ListingItem::unrated(film_id, slug);
        if self.kind == ListingKind::Watchlist {
            return Some(item);
        }

        item.rating = container
            .select(&self.rating)
            .next()
            .and_then(|el| rating_from_classes(el.value().classes()));
        item.like = Some(if container.select(&self.liked).next().is_some() {
            LikeStatus::Liked
        } else {
            LikeStatus::NotLiked
        });

        Some(item)
    }
}

impl PageScraper for ListingScraper {
    type Output = Vec<ListingItem>;

    fn extract(&self, document: &Html) -> Result<Vec<ListingItem>> {
        let mut items = Vec::new();

        for (position, container) in document.select(&self.container).enumerate() {
            match self.extract_item(container) {
                Some(item) => items.push(item),
                None => warn!(
                    "Skipping poster #{} of {} listing: no film id or slug",
                    position + 1,
                    self.kind.category()
                ),
            }
        }

        Ok(items)
    }
}

fn rating_from_classes<'a>(classes: impl Iterator<Item = &'a str>) -> Option<u8> {
    classes
        .filter_map(|class| RATED_CLASS.captures(class))
        .filter_map(|caps| {
            let raw = caps.get(1)?.as_str();
            match raw.parse::<u8>() {
                Ok(rating) => Some(rating),
                Err(e) => {
                    warn!("Ignoring rating class 'rated-{}': {}", raw, e);
                    None
                }
            }
        })
        .last()
}

/// Reads the number of pages of a listing from its pagination control.
pub struct PaginationScraper {
    last_page: Selector,
}

impl PaginationScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            last_page: selector(".paginate-page:last-child a")?,
        })
    }
}

impl PageScraper for PaginationScraper {
    type Output = u32;

    /// Single-page listings have no pagination control and count as one page.
    fn extract(&self, document: &Html) -> Result<u32> {
        let total = document
            .select(&self.last_page)
            .last()
            .and_then(|el| element_text(el).parse::<u32>().ok())
            .unwrap_or(1);

        Ok(total.max(1))
    }
}
