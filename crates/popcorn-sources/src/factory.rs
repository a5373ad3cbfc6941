//! Build catalog and position sources from configuration.

use anyhow::Result;
use popcorn_config::{Config, CredentialStore, API_KEY_ENV};
use std::time::Duration;
use tracing::debug;
use crate::geo::IpApiLocator;
use crate::omdb::OmdbClient;

pub fn build_catalog(config: &Config, credentials: &CredentialStore) -> Result<OmdbClient> {
    let api_key = credentials.resolve_omdb_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OMDb API key configured. Run 'popcorn config set-key' or set {}",
            API_KEY_ENV
        )
    })?;

    let client = OmdbClient::new(
        config.omdb.base_url.clone(),
        api_key,
        Duration::from_secs(config.omdb.timeout_secs),
    )?;
    debug!("Created OMDb catalog for {}", config.omdb.base_url);
    Ok(client)
}

/// Returns `None` when geolocation is disabled, which callers treat as a
/// missing capability
pub fn build_locator(config: &Config) -> Result<Option<IpApiLocator>> {
    if !config.geolocation.enabled {
        return Ok(None);
    }
    let locator = IpApiLocator::new(
        config.geolocation.endpoint.clone(),
        Duration::from_secs(config.omdb.timeout_secs),
    )?;
    Ok(Some(locator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_locator_disabled() {
        let mut config = Config::default();
        config.geolocation.enabled = false;
        assert!(build_locator(&config).unwrap().is_none());
    }

    #[test]
    fn test_build_catalog_with_stored_key() {
        let mut credentials = CredentialStore::new(std::path::PathBuf::from("/tmp/popcorn/credentials.toml"));
        credentials.set_omdb_api_key("stored-key".to_string());
        let catalog = build_catalog(&Config::default(), &credentials).unwrap();
        assert_eq!(catalog.base_url(), "https://www.omdbapi.com/");
    }
}
