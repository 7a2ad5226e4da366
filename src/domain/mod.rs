mod film;
mod listing;
mod snapshot;
mod storage;
mod user;

pub use film::{poster_url, FilmRecord};
pub use listing::{LikeStatus, ListingItem, ListingKind};
pub use snapshot::Snapshot;
pub use storage::Storage;
pub use user::{UserProfile, UserRecord, UserSocial};
