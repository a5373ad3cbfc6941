use popcorn_models::{UserRating, WatchedMovie};
use serde::Serialize;
use tracing::info;
use crate::persisted::PersistedCollection;
use crate::storage::{Storage, StorageError};

pub const DEFAULT_WATCHED_KEY: &str = "watched";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An entry with the same id was already present and has been replaced in place
    Replaced,
}

/// The user's durably persisted list of rated titles.
pub struct WatchedList<S> {
    collection: PersistedCollection<WatchedMovie, S>,
}

impl<S: Storage> WatchedList<S> {
    pub fn open(storage: S, key: &str) -> Result<Self, StorageError> {
        Ok(Self {
            collection: PersistedCollection::load(storage, key, Vec::new())?,
        })
    }

    pub fn movies(&self) -> &[WatchedMovie] {
        self.collection.items()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn get(&self, imdb_id: &str) -> Option<&WatchedMovie> {
        self.movies().iter().find(|m| m.imdb_id == imdb_id)
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.get(imdb_id).is_some()
    }

    pub fn user_rating_for(&self, imdb_id: &str) -> Option<UserRating> {
        self.get(imdb_id).map(|m| m.user_rating)
    }

    /// Insert `movie`, replacing any entry that has the same id
    pub fn add(&mut self, movie: WatchedMovie) -> Result<AddOutcome, StorageError> {
        let title = movie.title.clone();
        let outcome = self.collection.update(|items| {
            match items.iter_mut().find(|m| m.imdb_id == movie.imdb_id) {
                Some(existing) => {
                    *existing = movie;
                    AddOutcome::Replaced
                }
                None => {
                    items.push(movie);
                    AddOutcome::Added
                }
            }
        })?;
        info!("Watched list: {:?} '{}' ({} entries)", outcome, title, self.len());
        Ok(outcome)
    }

    /// Remove the entry with `imdb_id`; everything else keeps its order
    pub fn remove(&mut self, imdb_id: &str) -> Result<bool, StorageError> {
        let removed = self.collection.retain(|m| m.imdb_id != imdb_id)?;
        Ok(removed > 0)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.collection.clear()
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_movies(self.movies())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    pub fn from_movies(movies: &[WatchedMovie]) -> Self {
        Self {
            count: movies.len(),
            avg_imdb_rating: average(movies.iter().map(|m| m.imdb_rating)),
            avg_user_rating: average(movies.iter().map(|m| f64::from(m.user_rating.value()))),
            avg_runtime: average(movies.iter().map(|m| f64::from(m.runtime))),
        }
    }
}

/// Arithmetic mean; an empty input averages to 0.0
pub fn average(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn format_avg(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn movie(id: &str, runtime: u32, imdb_rating: f64, user_rating: u8) -> WatchedMovie {
        WatchedMovie {
            imdb_id: id.to_string(),
            title: format!("Movie {}", id),
            year: "2010".to_string(),
            poster: "N/A".to_string(),
            runtime,
            imdb_rating,
            user_rating: UserRating::new(user_rating).unwrap(),
            rating_decisions: 1,
            added_at: None,
        }
    }

    #[test]
    fn test_average_empty_is_zero() {
        assert_eq!(average(Vec::new()), 0.0);
        let summary = WatchedSummary::from_movies(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_runtime, 0.0);
        assert_eq!(format_avg(summary.avg_user_rating), "0.00");
    }

    #[test]
    fn test_summary_averages() {
        let movies = vec![movie("tt1375666", 148, 8.8, 10), movie("tt0088763", 116, 8.5, 9)];
        let summary = WatchedSummary::from_movies(&movies);
        assert_eq!(summary.count, 2);
        assert_eq!(format_avg(summary.avg_imdb_rating), "8.65");
        assert_eq!(format_avg(summary.avg_user_rating), "9.50");
        assert_eq!(format_avg(summary.avg_runtime), "132.00");
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let storage = MemoryStorage::new();
        let mut watched = WatchedList::open(storage.clone(), DEFAULT_WATCHED_KEY).unwrap();
        for (i, id) in ["a", "b", "c", "d"].iter().enumerate() {
            watched.add(movie(id, 100 + i as u32, 7.0, 5)).unwrap();
        }

        assert!(watched.remove("b").unwrap());
        assert!(!watched.remove("missing").unwrap());

        let ids: Vec<&str> = watched.movies().iter().map(|m| m.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
        assert_eq!(watched.get("c").unwrap().runtime, 102);

        let reloaded = WatchedList::open(storage, DEFAULT_WATCHED_KEY).unwrap();
        assert_eq!(reloaded.movies(), watched.movies());
    }

    #[test]
    fn test_add_existing_id_replaces_in_place() {
        let mut watched = WatchedList::open(MemoryStorage::new(), DEFAULT_WATCHED_KEY).unwrap();
        watched.add(movie("a", 90, 7.0, 5)).unwrap();
        watched.add(movie("b", 95, 7.5, 6)).unwrap();

        let outcome = watched.add(movie("a", 90, 7.0, 9)).unwrap();
        assert_eq!(outcome, AddOutcome::Replaced);
        assert_eq!(watched.len(), 2);
        assert_eq!(watched.movies()[0].imdb_id, "a");
        assert_eq!(watched.user_rating_for("a").map(UserRating::value), Some(9));
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let storage = MemoryStorage::new();
        let mut watched = WatchedList::open(storage.clone(), "custom-key").unwrap();
        watched.add(movie("a", 90, 7.0, 5)).unwrap();
        watched.clear().unwrap();

        let reloaded = WatchedList::open(storage, "custom-key").unwrap();
        assert!(reloaded.is_empty());
        assert!(!reloaded.contains("a"));
    }
}
