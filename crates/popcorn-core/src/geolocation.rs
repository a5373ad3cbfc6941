use popcorn_models::Position;
use popcorn_sources::{GeoError, PositionProvider};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeolocationState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub position: Option<Position>,
}

/// One-shot position queries against an optional provider.
pub struct Geolocation {
    provider: Option<Arc<dyn PositionProvider>>,
    state: watch::Sender<GeolocationState>,
    requests: AtomicU64,
}

impl Geolocation {
    pub fn new(provider: Option<Arc<dyn PositionProvider>>) -> Self {
        let (state, _rx) = watch::channel(GeolocationState::default());
        Self {
            provider,
            state,
            requests: AtomicU64::new(0),
        }
    }

    /// A geolocation with no capability behind it
    pub fn unsupported() -> Self {
        Self::new(None)
    }

    pub fn state(&self) -> GeolocationState {
        self.state.borrow().clone()
    }

    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    pub async fn get_position(&self) -> GeolocationState {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let Some(provider) = self.provider.as_ref() else {
            warn!("Geolocation requested but no provider is available");
            self.state.send_modify(|s| s.error = Some(GeoError::Unavailable.to_string()));
            return self.state();
        };

        self.state.send_modify(|s| {
            s.error = None;
            s.is_loading = true;
        });

        let result = provider.current_position().await;
        self.state.send_modify(|s| {
            match result {
                Ok(position) => {
                    info!("Position: {}, {}", position.latitude, position.longitude);
                    s.position = Some(position);
                }
                Err(e) => s.error = Some(e.to_string()),
            }
            s.is_loading = false;
        });
        self.state()
    }
}
