use serde::{Deserialize, Serialize};

/// Full record for a single title, fetched fresh on every selection.
///
/// `runtime` and `imdb_rating` keep the raw strings the catalog returns
/// (e.g. `"148 min"`, `"8.8"`, or `"N/A"`); use the parsing helpers to get numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    pub runtime: String,
    pub imdb_rating: String,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Runtime in whole minutes, parsed from the leading integer of `"<N> min"`
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .split_whitespace()
            .next()
            .and_then(|n| n.parse::<u32>().ok())
    }

    pub fn imdb_rating_value(&self) -> Option<f64> {
        self.imdb_rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(runtime: &str, rating: &str) -> MovieDetail {
        MovieDetail {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: "N/A".to_string(),
            runtime: runtime.to_string(),
            imdb_rating: rating.to_string(),
            plot: String::new(),
            released: "16 Jul 2010".to_string(),
            actors: "Leonardo DiCaprio".to_string(),
            director: "Christopher Nolan".to_string(),
            genre: "Action, Sci-Fi".to_string(),
        }
    }

    #[test]
    fn test_runtime_minutes() {
        assert_eq!(detail("148 min", "8.8").runtime_minutes(), Some(148));
        assert_eq!(detail("N/A", "8.8").runtime_minutes(), None);
        assert_eq!(detail("", "8.8").runtime_minutes(), None);
    }

    #[test]
    fn test_imdb_rating_value() {
        assert_eq!(detail("148 min", "8.8").imdb_rating_value(), Some(8.8));
        assert_eq!(detail("148 min", "N/A").imdb_rating_value(), None);
    }
}
