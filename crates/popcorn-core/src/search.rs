use popcorn_models::SearchResultItem;
use popcorn_sources::MovieCatalog;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use crate::request::LatestRequest;

pub const DEFAULT_MIN_QUERY_LENGTH: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub items: Vec<SearchResultItem>,
    pub is_loading: bool,
    /// Plain-text message shown in place of the result list
    pub error: Option<String>,
}

type QueryHook = Box<dyn FnMut(&str) + Send>;

/// Title search that follows a changing query.
///
/// Each query change cancels the previous request; only the newest query's
/// response is ever committed.
pub struct SearchFetcher {
    catalog: Arc<dyn MovieCatalog>,
    request: LatestRequest<SearchState>,
    min_query_length: usize,
    query: String,
    on_query_change: Option<QueryHook>,
}

impl SearchFetcher {
    pub fn new(catalog: Arc<dyn MovieCatalog>, min_query_length: usize) -> Self {
        Self {
            catalog,
            request: LatestRequest::new(SearchState::default()),
            min_query_length,
            query: String::new(),
            on_query_change: None,
        }
    }

    /// Run `hook` with the new query every time it changes
    pub fn set_query_hook(&mut self, hook: impl FnMut(&str) + Send + 'static) {
        self.on_query_change = Some(Box::new(hook));
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> SearchState {
        self.request.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.request.subscribe()
    }

    /// Update the query. Does nothing if it did not change.
    pub fn set_query(&mut self, query: &str) {
        if query == self.query {
            return;
        }
        self.query = query.to_string();
        if let Some(hook) = self.on_query_change.as_mut() {
            hook(query);
        }
        self.run();
    }

    /// Re-issue the current query
    pub fn refresh(&mut self) {
        self.run();
    }

    /// Teardown: abort the in-flight request without touching results
    pub fn cancel(&mut self) {
        self.request.cancel(|s| s.is_loading = false);
    }

    /// Wait until no request is loading and return the state at that point
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.request.subscribe();
        let settled = rx.wait_for(|s| !s.is_loading).await.map(|state| state.clone());
        settled.unwrap_or_else(|_| self.state())
    }

    fn run(&mut self) {
        let trimmed = self.query.trim();
        if trimmed.chars().count() < self.min_query_length {
            debug!("Query '{}' below {} characters, clearing results", trimmed, self.min_query_length);
            self.request.cancel(|s| {
                s.items.clear();
                s.error = None;
                s.is_loading = false;
            });
            return;
        }

        let catalog = Arc::clone(&self.catalog);
        let query = trimmed.to_string();
        debug!("Searching {} for '{}'", catalog.source_name(), query);

        self.request.start(
            |s| {
                s.error = None;
                s.is_loading = true;
            },
            async move { catalog.search(&query).await },
            |s, result| {
                match result {
                    Ok(items) => {
                        s.items = items;
                        s.error = None;
                    }
                    Err(e) => {
                        s.items.clear();
                        s.error = Some(e.to_string());
                    }
                }
                s.is_loading = false;
            },
        );
    }
}
