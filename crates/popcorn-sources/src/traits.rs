use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultItem};
use crate::error::SourceError;

/// A remote movie database that can be searched by title and queried by id.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn source_name(&self) -> &str;

    /// Titles matching `query`. A catalog that finds nothing returns
    /// `SourceError::NotFound` rather than an empty list.
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError>;

    async fn details(&self, imdb_id: &str) -> Result<MovieDetail, SourceError>;
}
