use super::{FilmRecord, UserProfile, UserRecord, UserSocial};
use crate::error::Result;

pub trait Storage: Send + Sync {
    /// No-op when a film with the same id is already stored.
    fn insert_film_if_absent(&self, film: &FilmRecord) -> Result<()>;
    /// Replaces watched/rated/liked/watchlist, creating the row if needed.
    fn upsert_user_profile(&self, profile: &UserProfile) -> Result<()>;
    /// Replaces following/followers, creating the row if needed.
    fn upsert_user_social(&self, social: &UserSocial) -> Result<()>;
    fn get_film(&self, id: &str) -> Result<Option<FilmRecord>>;
    fn get_films(&self, ids: &[String]) -> Result<Vec<FilmRecord>>;
    fn get_user(&self, id: &str) -> Result<Option<UserRecord>>;
}
