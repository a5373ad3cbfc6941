//! In-memory catalog for fetcher and app tests.
//!
//! Responses are either registered up front (`respond_*`) or held behind a
//! oneshot gate (`gate_*`) so a test decides exactly when a request resolves.

use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultItem};
use popcorn_sources::{MovieCatalog, SourceError};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

type SearchResult = Result<Vec<SearchResultItem>, SourceError>;
type DetailResult = Result<MovieDetail, SourceError>;

#[derive(Default)]
pub struct FakeCatalog {
    search_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<String>>,
    search_responses: Mutex<HashMap<String, SearchResult>>,
    detail_responses: Mutex<HashMap<String, DetailResult>>,
    search_gates: Mutex<HashMap<String, oneshot::Receiver<SearchResult>>>,
    detail_gates: Mutex<HashMap<String, oneshot::Receiver<DetailResult>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_search(&self, query: &str, result: SearchResult) {
        self.search_responses.lock().unwrap().insert(query.to_string(), result);
    }

    pub fn respond_details(&self, id: &str, result: DetailResult) {
        self.detail_responses.lock().unwrap().insert(id.to_string(), result);
    }

    pub fn gate_search(&self, query: &str) -> oneshot::Sender<SearchResult> {
        let (tx, rx) = oneshot::channel();
        self.search_gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    pub fn gate_details(&self, id: &str) -> oneshot::Sender<DetailResult> {
        let (tx, rx) = oneshot::channel();
        self.detail_gates.lock().unwrap().insert(id.to_string(), rx);
        tx
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> SearchResult {
        self.search_calls.lock().unwrap().push(query.to_string());
        let gate = self.search_gates.lock().unwrap().remove(query);
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(SourceError::Network("gate dropped".to_string())));
        }
        let response = self.search_responses.lock().unwrap().get(query).cloned();
        response.unwrap_or_else(|| Err(SourceError::NotFound("Movie not found!".to_string())))
    }

    async fn details(&self, imdb_id: &str) -> DetailResult {
        self.detail_calls.lock().unwrap().push(imdb_id.to_string());
        let gate = self.detail_gates.lock().unwrap().remove(imdb_id);
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(SourceError::Network("gate dropped".to_string())));
        }
        let response = self.detail_responses.lock().unwrap().get(imdb_id).cloned();
        response.unwrap_or_else(|| Err(SourceError::NotFound("Incorrect IMDb ID.".to_string())))
    }
}

pub fn item(id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        imdb_id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster: "N/A".to_string(),
    }
}

pub fn detail(id: &str, title: &str, runtime: &str, rating: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster: "N/A".to_string(),
        runtime: runtime.to_string(),
        imdb_rating: rating.to_string(),
        plot: "A plot.".to_string(),
        released: "15 Jun 2005".to_string(),
        actors: "Christian Bale".to_string(),
        director: "Christopher Nolan".to_string(),
        genre: "Action".to_string(),
    }
}
