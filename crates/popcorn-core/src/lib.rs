pub mod request;
pub mod search;
pub mod detail;
pub mod storage;
pub mod persisted;
pub mod watched;
pub mod keyboard;
pub mod geolocation;
pub mod app;

#[cfg(test)]
pub(crate) mod test_support;

pub use search::{SearchFetcher, SearchState, DEFAULT_MIN_QUERY_LENGTH};
pub use detail::{DetailFetcher, DetailState};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use persisted::PersistedCollection;
pub use watched::{AddOutcome, WatchedList, WatchedSummary, average, format_avg, DEFAULT_WATCHED_KEY};
pub use keyboard::{KeyBinding, KeyboardHub};
pub use geolocation::{Geolocation, GeolocationState};
pub use app::{App, AppError, Intent, RatingDraft, SearchInput, DEFAULT_TITLE};
