use super::{selector, PageScraper};
use crate::error::Result;
use scraper::{Html, Selector};

/// Usernames listed on a following or followers page.
pub struct PeopleScraper {
    person: Selector,
}

impl PeopleScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            person: selector("tr .person-summary .title-3 a")?,
        })
    }
}

impl PageScraper for PeopleScraper {
    type Output = Vec<String>;

    fn extract(&self, document: &Html) -> Result<Vec<String>> {
        Ok(document
            .select(&self.person)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(username_from_href)
            .collect())
    }
}

/// "/jane/" -> "jane"
fn username_from_href(href: &str) -> Option<String> {
    href.split('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_usernames_in_order() {
        let document = Html::parse_document(
            r#"<table class="person-table"><tbody>
                <tr><td><div class="person-summary"><h3 class="title-3"><a href="/jane/" class="name">Jane</a></h3></div></td></tr>
                <tr><td><div class="person-summary"><h3 class="title-3"><a href="/bob/">Bob</a></h3></div></td></tr>
                <tr><td><div class="person-summary"><h3 class="title-3"><a>Nobody</a></h3></div></td></tr>
            </tbody></table>"#,
        );

        let people = PeopleScraper::new().unwrap().extract(&document).unwrap();
        assert_eq!(people, vec!["jane", "bob"]);
    }

    #[test]
    fn username_is_first_path_segment() {
        assert_eq!(username_from_href("/jane/"), Some("jane".to_string()));
        assert_eq!(username_from_href("jane/films/"), Some("jane".to_string()));
        assert_eq!(username_from_href("/"), None);
    }
}
