use async_trait::async_trait;
use popcorn_models::Position;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeoError {
    #[error("Your device does not support geolocation")]
    Unavailable,

    #[error("{0}")]
    Failed(String),
}

/// One-shot device position query.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<Position, GeoError>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Approximate position from an IP geolocation endpoint (ipapi.co format)
#[derive(Clone)]
pub struct IpApiLocator {
    client: Arc<Client>,
    endpoint: String,
}

impl IpApiLocator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeoError::Failed(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client: Arc::new(client),
            endpoint: endpoint.into(),
        })
    }
}

pub fn parse_position(body: &str) -> Result<Position, GeoError> {
    let parsed: IpApiResponse = serde_json::from_str(body)
        .map_err(|e| GeoError::Failed(format!("Unexpected geolocation response: {}", e)))?;

    if parsed.error {
        return Err(GeoError::Failed(
            parsed.reason.unwrap_or_else(|| "Position unavailable".to_string()),
        ));
    }

    match (parsed.latitude, parsed.longitude) {
        (Some(latitude), Some(longitude)) => Ok(Position::new(latitude, longitude)),
        _ => Err(GeoError::Failed("Position unavailable".to_string())),
    }
}

#[async_trait]
impl PositionProvider for IpApiLocator {
    async fn current_position(&self) -> Result<Position, GeoError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| GeoError::Failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeoError::Failed(format!(
                "Geolocation request failed: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeoError::Failed(e.to_string()))?;
        let position = parse_position(&body)?;
        debug!("Resolved position {}, {}", position.latitude, position.longitude);
        Ok(position)
    }
}
