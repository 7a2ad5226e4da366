use crate::error::{CrawlError, Result};
use scraper::{ElementRef, Html, Selector};

pub(crate) mod film;
pub(crate) mod listing;
pub(crate) mod people;
pub(crate) mod profile_stats;

/// Applies a page type's selector bindings to a parsed document.
///
/// A binding that matches nothing leaves its field empty; that is not an
/// error. Implementations only fail when the page is unusable as a whole.
pub trait PageScraper {
    type Output;

    fn extract(&self, document: &Html) -> Result<Self::Output>;
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CrawlError::Selector(format!("{}: {}", css, e)))
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Single-value binding: first match wins.
pub(crate) fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

pub(crate) fn first_attr(document: &Html, selector: &Selector, attr: &str) -> String {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Multi-value binding: every match, in document order. Matches without
/// text are kept as empty strings.
pub(crate) fn all_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document.select(selector).map(element_text).collect()
}

/// Parses counters such as "1,204".
pub(crate) fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().replace([',', '.', '\u{a0}'], "").parse().ok()
}
