use super::{FilmRecord, UserRecord};
use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub generated_at: String,
    pub version: String,
    pub user: UserRecord,
    pub total_films: usize,
    pub films: Vec<FilmRecord>,
}

impl Snapshot {
    pub fn new(user: UserRecord, films: Vec<FilmRecord>) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            user,
            total_films: films.len(),
            films,
        }
    }
}
