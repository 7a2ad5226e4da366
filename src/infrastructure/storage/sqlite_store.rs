use super::encoding::{
    decode_likes, decode_list, decode_ratings, encode_likes, encode_list, encode_ratings,
};
use crate::domain::{FilmRecord, Storage, UserProfile, UserRecord, UserSocial};
use crate::error::{CrawlError, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

// Stays well below SQLITE_MAX_VARIABLE_NUMBER on every SQLite build.
const LOOKUP_CHUNK: usize = 500;

const FILM_COLUMNS: &str =
    "id, slug, title, image, release_year, genres, rating, director, cast_members";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let store = Self::with_connection(conn)?;
        info!("Connected to database {}", path.as_ref().display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| CrawlError::Other("database lock poisoned".to_string()))?;
        conn.close().map_err(|(_, e)| CrawlError::Storage(e))?;
        info!("Disconnected from database");
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CrawlError::Other("database lock poisoned".to_string()))
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS films (
            id           TEXT PRIMARY KEY,
            slug         TEXT NOT NULL,
            title        TEXT NOT NULL DEFAULT '',
            image        TEXT NOT NULL DEFAULT '',
            release_year TEXT NOT NULL DEFAULT '',
            genres       TEXT NOT NULL DEFAULT '',
            rating       TEXT NOT NULL DEFAULT '',
            director     TEXT NOT NULL DEFAULT '',
            cast_members TEXT NOT NULL DEFAULT '',
            scraped_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_films_slug ON films(slug);

        CREATE TABLE IF NOT EXISTS users (
            id         TEXT PRIMARY KEY,
            watched    TEXT NOT NULL DEFAULT '',
            rated      TEXT NOT NULL DEFAULT '',
            liked      TEXT NOT NULL DEFAULT '',
            watchlist  TEXT NOT NULL DEFAULT '',
            following  TEXT NOT NULL DEFAULT '',
            followers  TEXT NOT NULL DEFAULT '',
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

fn film_from_row(row: &Row<'_>) -> rusqlite::Result<FilmRecord> {
    Ok(FilmRecord {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        image: row.get(3)?,
        release: row.get(4)?,
        genres: decode_list(&row.get::<_, String>(5)?),
        rating: row.get(6)?,
        director: row.get(7)?,
        cast: decode_list(&row.get::<_, String>(8)?),
    })
}

impl Storage for SqliteStore {
    fn insert_film_if_absent(&self, film: &FilmRecord) -> Result<()> {
        self.conn()?.execute(
            "INSERT OR IGNORE INTO films
                (id, slug, title, image, release_year, genres, rating, director, cast_members)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                film.id,
                film.slug,
                film.title,
                film.image,
                film.release,
                encode_list(&film.genres),
                film.rating,
                film.director,
                encode_list(&film.cast),
            ],
        )?;
        Ok(())
    }

    fn upsert_user_profile(&self, profile: &UserProfile) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO users (id, watched, rated, liked, watchlist)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                watched = excluded.watched,
                rated = excluded.rated,
                liked = excluded.liked,
                watchlist = excluded.watchlist,
                updated_at = datetime('now')",
            params![
                profile.id,
                encode_list(&profile.watched),
                encode_ratings(&profile.rated),
                encode_likes(&profile.liked),
                encode_list(&profile.watchlist),
            ],
        )?;
        Ok(())
    }

    fn upsert_user_social(&self, social: &UserSocial) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO users (id, following, followers)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                following = excluded.following,
                followers = excluded.followers,
                updated_at = datetime('now')",
            params![
                social.id,
                encode_list(&social.following),
                encode_list(&social.followers),
            ],
        )?;
        Ok(())
    }

    fn get_film(&self, id: &str) -> Result<Option<FilmRecord>> {
        let film = self
            .conn()?
            .query_row(
                &format!("SELECT {} FROM films WHERE id = ?1", FILM_COLUMNS),
                params![id],
                film_from_row,
            )
            .optional()?;
        Ok(film)
    }

    /// Films come back in the order of `ids`; unknown ids are skipped and
    /// repeated ids are returned once.
    fn get_films(&self, ids: &[String]) -> Result<Vec<FilmRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.conn()?;
        let mut found: HashMap<String, FilmRecord> = HashMap::new();

        for chunk in ids.chunks(LOOKUP_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(",");
            let sql = format!(
                "SELECT {} FROM films WHERE id IN ({})",
                FILM_COLUMNS, placeholders
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(chunk.iter()), film_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            for film in rows {
                found.insert(film.id.clone(), film);
            }
        }

        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }

    fn get_user(&self, id: &str) -> Result<Option<UserRecord>> {
        let user = self
            .conn()?
            .query_row(
                "SELECT id, watched, rated, liked, watchlist, following, followers
                 FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        watched: decode_list(&row.get::<_, String>(1)?),
                        rated: decode_ratings(&row.get::<_, String>(2)?),
                        liked: decode_likes(&row.get::<_, String>(3)?),
                        watchlist: decode_list(&row.get::<_, String>(4)?),
                        following: decode_list(&row.get::<_, String>(5)?),
                        followers: decode_list(&row.get::<_, String>(6)?),
                    })
                },
            )
            .optional()?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LikeStatus;

    fn film(id: &str, title: &str) -> FilmRecord {
        FilmRecord {
            id: id.to_string(),
            slug: format!("film-{}", id),
            title: title.to_string(),
            image: format!("https://img.example/{}.jpg", id),
            release: "1995".to_string(),
            genres: vec!["Crime".to_string(), "Drama".to_string()],
            rating: "4.21".to_string(),
            director: "Michael Mann".to_string(),
            cast: vec!["Al Pacino".to_string(), "Robert De Niro".to_string()],
        }
    }

    #[test]
    fn insert_film_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_film_if_absent(&film("1", "Heat")).unwrap();
        store
            .insert_film_if_absent(&film("1", "Something Else"))
            .unwrap();

        let stored = store.get_film("1").unwrap().unwrap();
        assert_eq!(stored, film("1", "Heat"));
    }

    #[test]
    fn film_with_empty_lists_reads_back_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut sparse = film("2", "Ran");
        sparse.genres.clear();
        sparse.cast.clear();
        store.insert_film_if_absent(&sparse).unwrap();

        let stored = store.get_film("2").unwrap().unwrap();
        assert!(stored.genres.is_empty());
        assert!(stored.cast.is_empty());
    }

    #[test]
    fn get_films_follows_requested_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for (id, title) in [("1", "Heat"), ("2", "Ran"), ("3", "Alien")] {
            store.insert_film_if_absent(&film(id, title)).unwrap();
        }

        let ids: Vec<String> = ["3", "missing", "1", "3"]
            .iter()
            .map(|id| id.to_string())
            .collect();
        let titles: Vec<String> = store
            .get_films(&ids)
            .unwrap()
            .into_iter()
            .map(|film| film.title)
            .collect();

        assert_eq!(titles, vec!["Alien", "Heat"]);
        assert!(store.get_films(&[]).unwrap().is_empty());
        assert!(store.get_film("missing").unwrap().is_none());
    }

    #[test]
    fn profile_and_social_updates_leave_each_other_alone() {
        let store = SqliteStore::open_in_memory().unwrap();

        store
            .upsert_user_social(&UserSocial {
                id: "s0wcy".to_string(),
                following: vec!["jane".to_string()],
                followers: vec!["bob".to_string(), "eve".to_string()],
            })
            .unwrap();
        store
            .upsert_user_profile(&UserProfile {
                id: "s0wcy".to_string(),
                watched: vec!["1".to_string(), "2".to_string()],
                rated: vec![Some(8), None],
                liked: vec![LikeStatus::Liked, LikeStatus::NotLiked],
                watchlist: vec!["3".to_string()],
            })
            .unwrap();

        let user = store.get_user("s0wcy").unwrap().unwrap();
        assert_eq!(user.watched, vec!["1", "2"]);
        assert_eq!(user.rated, vec![Some(8), None]);
        assert_eq!(user.liked, vec![LikeStatus::Liked, LikeStatus::NotLiked]);
        assert_eq!(user.watchlist, vec!["3"]);
        assert_eq!(user.following, vec!["jane"]);
        assert_eq!(user.followers, vec!["bob", "eve"]);

        store
            .upsert_user_profile(&UserProfile::new("s0wcy"))
            .unwrap();
        let user = store.get_user("s0wcy").unwrap().unwrap();
        assert!(user.watched.is_empty());
        assert!(user.watchlist.is_empty());
        assert_eq!(user.followers, vec!["bob", "eve"]);
    }

    #[test]
    fn unknown_user_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get_user("nobody").unwrap().is_none());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl.db");

        let store = SqliteStore::open(&path).unwrap();
        store.insert_film_if_absent(&film("1", "Heat")).unwrap();
        store.close().unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get_film("1").unwrap().unwrap().title, "Heat");
    }
}
