use popcorn_models::MovieDetail;
use popcorn_sources::MovieCatalog;
use std::sync::Arc;
use tracing::{debug, error};
use crate::request::LatestRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub record: Option<MovieDetail>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Fetches the full record for the selected title.
pub struct DetailFetcher {
    catalog: Arc<dyn MovieCatalog>,
    request: LatestRequest<DetailState>,
    id: Option<String>,
}

impl DetailFetcher {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            catalog,
            request: LatestRequest::new(DetailState::default()),
            id: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> DetailState {
        self.request.snapshot()
    }

    /// Point the fetcher at a new id. `None` or an empty id closes the record.
    pub fn set_id(&mut self, id: Option<&str>) {
        let id = id.filter(|id| !id.trim().is_empty());
        if id == self.id.as_deref() {
            return;
        }
        self.id = id.map(str::to_string);

        let Some(id) = self.id.clone() else {
            self.request.cancel(|s| *s = DetailState::default());
            return;
        };

        let catalog = Arc::clone(&self.catalog);
        debug!("Fetching details for {}", id);
        self.request.start(
            |s| {
                s.record = None;
                s.error = None;
                s.is_loading = true;
            },
            async move {
                let result = catalog.details(&id).await;
                (id, result)
            },
            |s, (id, result)| {
                match result {
                    Ok(record) => s.record = Some(record),
                    Err(e) => {
                        error!("Failed to fetch details for {}: {}", id, e);
                        s.error = Some(e.to_string());
                    }
                }
                s.is_loading = false;
            },
        );
    }

    pub fn cancel(&mut self) {
        self.request.cancel(|s| s.is_loading = false);
    }

    pub async fn settled(&self) -> DetailState {
        let mut rx = self.request.subscribe();
        let settled = rx.wait_for(|s| !s.is_loading).await.map(|state| state.clone());
        settled.unwrap_or_else(|_| self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{detail, FakeCatalog};
    use popcorn_sources::SourceError;

    fn fetcher(catalog: &Arc<FakeCatalog>) -> DetailFetcher {
        DetailFetcher::new(Arc::clone(catalog) as Arc<dyn MovieCatalog>)
    }

    #[tokio::test]
    async fn test_fetches_any_non_empty_id() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.respond_details("t1", Ok(detail("t1", "Short Id", "90 min", "7.0")));
        let mut details = fetcher(&catalog);

        details.set_id(Some("t1"));
        assert!(details.state().is_loading);

        let state = details.settled().await;
        assert_eq!(state.record.map(|r| r.title), Some("Short Id".to_string()));
        assert_eq!(catalog.detail_calls(), vec!["t1".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_id_is_ignored() {
        let catalog = Arc::new(FakeCatalog::new());
        let mut details = fetcher(&catalog);

        details.set_id(Some(""));
        details.set_id(None);
        assert!(catalog.detail_calls().is_empty());
        assert_eq!(details.state(), DetailState::default());
    }

    #[tokio::test]
    async fn test_failure_is_recorded_and_loading_cleared() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.respond_details("tt404", Err(SourceError::NotFound("Incorrect IMDb ID.".to_string())));
        let mut details = fetcher(&catalog);

        details.set_id(Some("tt404"));
        let state = details.settled().await;
        assert!(!state.is_loading);
        assert!(state.record.is_none());
        assert_eq!(state.error.as_deref(), Some("Incorrect IMDb ID."));
    }

    #[tokio::test]
    async fn test_switching_id_discards_stale_detail() {
        let catalog = Arc::new(FakeCatalog::new());
        let slow = catalog.gate_details("tt1");
        catalog.respond_details("tt2", Ok(detail("tt2", "Second", "100 min", "6.5")));
        let mut details = fetcher(&catalog);

        details.set_id(Some("tt1"));
        tokio::task::yield_now().await;
        details.set_id(Some("tt2"));

        let state = details.settled().await;
        let _ = slow.send(Ok(detail("tt1", "First", "90 min", "7.0")));
        tokio::task::yield_now().await;

        assert_eq!(state.record.as_ref().map(|r| r.imdb_id.as_str()), Some("tt2"));
        assert_eq!(details.state().record.map(|r| r.imdb_id), Some("tt2".to_string()));
    }

    #[tokio::test]
    async fn test_closing_clears_record() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.respond_details("tt2", Ok(detail("tt2", "Second", "100 min", "6.5")));
        let mut details = fetcher(&catalog);

        details.set_id(Some("tt2"));
        details.settled().await;
        details.set_id(None);

        assert_eq!(details.state(), DetailState::default());
        assert_eq!(details.id(), None);
    }
}
