use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub image: String,
    pub release: String,
    pub genres: Vec<String>,
    /// Site aggregate score, kept verbatim.
    pub rating: String,
    pub director: String,
    pub cast: Vec<String>,
}

impl FilmRecord {
    pub fn is_usable(&self) -> bool {
        !self.id.is_empty() && !self.slug.is_empty()
    }
}

/// Poster URLs are not in the page markup, they follow from the film id:
/// every character of the id becomes its own path segment.
pub fn poster_url(poster_base: &str, film_id: &str, slug: &str) -> String {
    let segmented_id = film_id
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join("/");

    format!(
        "{}/{}/{}-{}-0-230-0-345-crop.jpg",
        poster_base.trim_end_matches('/'),
        segmented_id,
        film_id,
        slug
    )
}
