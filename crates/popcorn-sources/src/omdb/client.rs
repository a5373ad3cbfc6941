use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieCatalog;
use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultItem};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingApiKey);
        }
        Ok(Self {
            client: Arc::new(api::create_http_client(timeout)?),
            base_url: base_url.into(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError> {
        api::search_titles(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn details(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        api::get_title(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}
