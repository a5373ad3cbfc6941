use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::detail::MovieDetail;
use crate::rating::UserRating;

/// A title the user has watched and rated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedMovie {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    pub runtime: u32, // minutes, 0 when the catalog had none
    pub imdb_rating: f64, // 0.0 when the catalog had none
    pub user_rating: UserRating,
    /// How many times the rating was changed before it was confirmed
    pub rating_decisions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WatchedMovie {
    pub fn from_detail(detail: &MovieDetail, user_rating: UserRating, rating_decisions: u32) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            runtime: detail.runtime_minutes().unwrap_or(0),
            imdb_rating: detail.imdb_rating_value().unwrap_or(0.0),
            user_rating,
            rating_decisions,
            added_at: Some(Utc::now()),
        }
    }
}
