use serde::{Deserialize, Serialize};

/// One row of a title search. Lives only as long as the response it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultItem {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
}
