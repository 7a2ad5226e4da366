use super::{all_texts, first_attr, first_text, selector, PageScraper};
use crate::domain::{poster_url, FilmRecord};
use crate::error::{CrawlError, Result};
use scraper::{Html, Selector};

/// Raw fields of a film detail page, before the slug and poster are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmPage {
    pub id: String,
    pub title: String,
    pub release: String,
    pub genres: Vec<String>,
    pub rating: String,
    pub director: String,
    pub cast: Vec<String>,
}

impl FilmPage {
    pub fn into_record(self, slug: &str, poster_base: &str) -> Result<FilmRecord> {
        let film = FilmRecord {
            image: poster_url(poster_base, &self.id, slug),
            id: self.id,
            slug: slug.to_string(),
            title: self.title,
            release: self.release,
            genres: self.genres,
            rating: self.rating,
            director: self.director,
            cast: self.cast,
        };

        if !film.is_usable() {
            return Err(CrawlError::Parse(format!(
                "film page for '{}' (id '{}') is missing its id or slug",
                slug, film.id
            )));
        }
        Ok(film)
    }
}

pub struct FilmPageScraper {
    backdrop: Selector,
    title: Selector,
    release: Selector,
    genres: Selector,
    rating: Selector,
    director: Selector,
    cast: Selector,
}

impl FilmPageScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            backdrop: selector("#backdrop")?,
            title: selector("meta[property='og:title']")?,
            release: selector(".releaseyear a")?,
            genres: selector("#tab-genres .text-sluglist:nth-of-type(1) p a")?,
            rating: selector("meta[name='twitter:data2']")?,
            director: selector(".directorlist a span")?,
            cast: selector("#tab-cast .cast-list p a")?,
        })
    }
}

impl PageScraper for FilmPageScraper {
    type Output = FilmPage;

    fn extract(&self, document: &Html) -> Result<FilmPage> {
        // "3.87 out of 5" -> "3.87"
        let rating = first_attr(document, &self.rating, "content")
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(FilmPage {
            id: first_attr(document, &self.backdrop, "data-film-id"),
            title: first_attr(document, &self.title, "content"),
            release: first_text(document, &self.release),
            genres: all_texts(document, &self.genres),
            rating,
            director: first_text(document, &self.director),
            cast: all_texts(document, &self.cast),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUNE: &str = r#"
        <html><head>
            <meta property="og:title" content="Dune (2021)">
            <meta name="twitter:data2" content="3.87 out of 5">
        </head><body>
            <div id="backdrop" data-film-id="371378" data-film-slug="dune-2021"></div>
            <small class="number releaseyear"><a href="/films/year/2021/">2021</a></small>
            <p><span class="directorlist"><a href="/director/denis-villeneuve/"><span class="prettify">Denis Villeneuve</span></a></span></p>
            <div id="tab-cast"><div class="cast-list text-sluglist"><p>
                <a href="/actor/timothee-chalamet/">Timothée Chalamet</a>
                <a href="/actor/rebecca-ferguson/">Rebecca Ferguson</a>
            </p></div></div>
            <div id="tab-genres">
                <div class="text-sluglist capitalize"><p>
                    <a href="/films/genre/science-fiction/">Science Fiction</a>
                    <a href="/films/genre/adventure/">Adventure</a>
                </p></div>
                <div class="text-sluglist capitalize"><p>
                    <a href="/films/theme/epic/">Epic heroes</a>
                </p></div>
            </div>
        </body></html>
    "#;

    #[test]
    fn extracts_detail_fields() {
        let scraper = FilmPageScraper::new().unwrap();
        let page = scraper.extract(&Html::parse_document(DUNE)).unwrap();

        assert_eq!(page.id, "371378");
        assert_eq!(page.title, "Dune (2021)");
        assert_eq!(page.release, "2021");
        assert_eq!(page.genres, vec!["Science Fiction", "Adventure"]);
        assert_eq!(page.rating, "3.87");
        assert_eq!(page.director, "Denis Villeneuve");
        assert_eq!(page.cast, vec!["Timothée Chalamet", "Rebecca Ferguson"]);
    }

    #[test]
    fn builds_record_with_poster() {
        let scraper = FilmPageScraper::new().unwrap();
        let film = scraper
            .extract(&Html::parse_document(DUNE))
            .unwrap()
            .into_record("dune-2021", "https://img.example")
            .unwrap();

        assert_eq!(film.slug, "dune-2021");
        assert_eq!(
            film.image,
            "https://img.example/3/7/1/3/7/8/371378-dune-2021-0-230-0-345-crop.jpg"
        );
        assert!(film.is_usable());
    }

    #[test]
    fn sparse_page_leaves_fields_empty() {
        let scraper = FilmPageScraper::new().unwrap();
        let page = scraper
            .extract(&Html::parse_document(
                r#"<div id="backdrop" data-film-id="9"></div>"#,
            ))
            .unwrap();

        assert_eq!(page.id, "9");
        assert!(page.title.is_empty());
        assert!(page.rating.is_empty());
        assert!(page.genres.is_empty());
        assert!(page.cast.is_empty());
    }

    #[test]
    fn page_without_id_is_unusable() {
        let scraper = FilmPageScraper::new().unwrap();
        let page = scraper
            .extract(&Html::parse_document("<html><body></body></html>"))
            .unwrap();

        assert!(matches!(
            page.into_record("ghost", "https://img.example"),
            Err(CrawlError::Parse(_))
        ));
    }

    #[test]
    fn empty_slug_is_unusable() {
        let page = FilmPage {
            id: "42".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            page.into_record("", "https://img.example"),
            Err(CrawlError::Parse(_))
        ));
    }
}
