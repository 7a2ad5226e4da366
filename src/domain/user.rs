use super::listing::{LikeStatus, ListingItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub watched: Vec<String>,
    pub rated: Vec<Option<u8>>,
    pub liked: Vec<LikeStatus>,
    /// Film ids, not usernames.
    pub watchlist: Vec<String>,
    pub following: Vec<String>,
    pub followers: Vec<String>,
}

/// Profile half of a user row. `watched`, `rated` and `liked` are index
/// aligned to the watched listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub watched: Vec<String>,
    pub rated: Vec<Option<u8>>,
    pub liked: Vec<LikeStatus>,
    pub watchlist: Vec<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn push_watched(&mut self, item: &ListingItem) {
        self.watched.push(item.film_id.clone());
        self.rated.push(item.rating);
        self.liked.push(item.like.unwrap_or(LikeStatus::NotLiked));
    }

    pub fn push_watchlist(&mut self, item: &ListingItem) {
        self.watchlist.push(item.film_id.clone());
    }
}

/// Social half of a user row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSocial {
    pub id: String,
    pub following: Vec<String>,
    pub followers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watched_lists_stay_aligned() {
        let mut profile = UserProfile::new("s0wcy");
        profile.push_watched(&ListingItem {
            film_id: "1".into(),
            slug: "a".into(),
            rating: Some(4),
            like: Some(LikeStatus::Liked),
        });
        profile.push_watched(&ListingItem::unrated("2", "b"));
        profile.push_watchlist(&ListingItem::unrated("3", "c"));

        assert_eq!(profile.watched, vec!["1", "2"]);
        assert_eq!(profile.rated, vec![Some(4), None]);
        assert_eq!(profile.liked, vec![LikeStatus::Liked, LikeStatus::NotLiked]);
        assert_eq!(profile.watchlist, vec!["3"]);
    }
}
