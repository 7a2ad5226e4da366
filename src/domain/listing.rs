use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Watched,
    Watchlist,
}

impl ListingKind {
    /// Path segment of the listing under the user's profile.
    pub fn category(&self) -> &'static str {
        match self {
            ListingKind::Watched => "films",
            ListingKind::Watchlist => "watchlist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeStatus {
    Liked,
    NotLiked,
}

impl LikeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeStatus::Liked => "liked",
            LikeStatus::NotLiked => "not liked",
        }
    }
}

impl FromStr for LikeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liked" => Ok(LikeStatus::Liked),
            "not liked" => Ok(LikeStatus::NotLiked),
            other => Err(format!("unknown like status '{}'", other)),
        }
    }
}

/// One poster of a listing page. `rating` and `like` are `None` on
/// watchlist pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub film_id: String,
    pub slug: String,
    /// Half-star units, 1..=10.
    pub rating: Option<u8>,
    pub like: Option<LikeStatus>,
}

impl ListingItem {
    pub fn unrated(film_id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            film_id: film_id.into(),
            slug: slug.into(),
            rating: None,
            like: None,
        }
    }
}
