//! List-valued columns are stored as comma-joined text.

use crate::domain::LikeStatus;

const DELIMITER: &str = ",";
const NO_RATING: &str = "null";

pub fn encode_list(values: &[String]) -> String {
    values.join(DELIMITER)
}

pub fn decode_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(DELIMITER).map(str::to_string).collect()
}

pub fn encode_ratings(ratings: &[Option<u8>]) -> String {
    ratings
        .iter()
        .map(|rating| match rating {
            Some(value) => value.to_string(),
            None => NO_RATING.to_string(),
        })
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// Anything that is not a number decodes as "no rating", so the list keeps
/// its length.
pub fn decode_ratings(raw: &str) -> Vec<Option<u8>> {
    decode_list(raw)
        .iter()
        .map(|value| value.parse().ok())
        .collect()
}

pub fn encode_likes(likes: &[LikeStatus]) -> String {
    likes
        .iter()
        .map(LikeStatus::as_str)
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

pub fn decode_likes(raw: &str) -> Vec<LikeStatus> {
    decode_list(raw)
        .iter()
        .map(|value| value.parse().unwrap_or(LikeStatus::NotLiked))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_column_is_empty_list() {
        assert!(decode_list("").is_empty());
        assert!(decode_ratings("").is_empty());
        assert!(decode_likes("").is_empty());
        assert_eq!(encode_list(&[]), "");
    }

    #[test]
    fn ratings_keep_null_positions() {
        let encoded = encode_ratings(&[Some(4), None, Some(8)]);
        assert_eq!(encoded, "4,null,8");
        assert_eq!(decode_ratings(&encoded), vec![Some(4), None, Some(8)]);
    }

    #[test]
    fn likes_use_readable_labels() {
        let encoded = encode_likes(&[LikeStatus::Liked, LikeStatus::NotLiked]);
        assert_eq!(encoded, "liked,not liked");
        assert_eq!(
            decode_likes("liked,not liked,???"),
            vec![LikeStatus::Liked, LikeStatus::NotLiked, LikeStatus::NotLiked]
        );
    }
}
