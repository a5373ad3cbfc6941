pub mod search_result;
pub mod detail;
pub mod rating;
pub mod watched;
pub mod selection;
pub mod position;

pub use search_result::SearchResultItem;
pub use detail::MovieDetail;
pub use rating::UserRating;
pub use watched::WatchedMovie;
pub use selection::Selection;
pub use position::Position;
